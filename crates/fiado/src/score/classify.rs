use serde::{Deserialize, Serialize};

/// Trust tier derived from the final, already-clamped score, so the displayed
/// score and the displayed tier can never disagree at the boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Elite,
    Confiavel,
    Ok,
    Instavel,
    Perigo,
    /// Declared in the tier set but not produced by any threshold; kept so
    /// stored payloads naming it keep deserializing.
    Caloteiro,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::Elite => "Elite",
            Classification::Confiavel => "Confiável",
            Classification::Ok => "Ok",
            Classification::Instavel => "Instável",
            Classification::Perigo => "Perigo",
            Classification::Caloteiro => "Caloteiro",
        }
    }
}

pub(crate) fn classify(score: i32) -> Classification {
    if score >= 900 {
        Classification::Elite
    } else if score >= 700 {
        Classification::Confiavel
    } else if score >= 400 {
        Classification::Ok
    } else if score >= 200 {
        Classification::Instavel
    } else {
        Classification::Perigo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_map_to_tiers() {
        assert_eq!(classify(1000), Classification::Elite);
        assert_eq!(classify(900), Classification::Elite);
        assert_eq!(classify(899), Classification::Confiavel);
        assert_eq!(classify(700), Classification::Confiavel);
        assert_eq!(classify(699), Classification::Ok);
        assert_eq!(classify(400), Classification::Ok);
        assert_eq!(classify(399), Classification::Instavel);
        assert_eq!(classify(200), Classification::Instavel);
        assert_eq!(classify(199), Classification::Perigo);
        assert_eq!(classify(0), Classification::Perigo);
    }

    #[test]
    fn labels_keep_their_accents() {
        assert_eq!(Classification::Confiavel.label(), "Confiável");
        assert_eq!(Classification::Instavel.label(), "Instável");
    }
}
