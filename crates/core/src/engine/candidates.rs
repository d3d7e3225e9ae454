use crate::domain::play::{Candidate, Formation, PassDepth, PlayLocation, RunGap};

pub const DEFAULT_BALL_CARRIERS: [&str; 2] = ["D.Swift", "K.Monangai"];

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    /// Run candidates are produced once per carrier, in this order.
    pub ball_carriers: Vec<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            ball_carriers: DEFAULT_BALL_CARRIERS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl GeneratorConfig {
    pub fn from_env() -> Self {
        let mut out = Self::default();

        if let Ok(s) = std::env::var("PLAYCALL_BALL_CARRIERS") {
            let carriers: Vec<String> = s
                .split(',')
                .map(|part| part.trim())
                .filter(|part| !part.is_empty())
                .map(|part| part.to_string())
                .collect();
            if !carriers.is_empty() {
                out.ball_carriers = carriers;
            }
        }

        out
    }
}

/// Every schematically distinct play, runs first then passes.
///
/// The order is stable across calls and is the ranking tie-break.
pub fn generate_candidates(config: &GeneratorConfig) -> Vec<Candidate> {
    let runs = Formation::ALL.len() * PlayLocation::ALL.len() * RunGap::ALL.len() * config.ball_carriers.len();
    let passes = Formation::ALL.len() * PlayLocation::ALL.len() * PassDepth::ALL.len();
    let mut out = Vec::with_capacity(runs + passes);

    for formation in Formation::ALL {
        for location in PlayLocation::ALL {
            for gap in RunGap::ALL {
                for carrier in &config.ball_carriers {
                    out.push(Candidate::run(formation, location, gap, carrier));
                }
            }
        }
    }

    for formation in Formation::ALL {
        for location in PlayLocation::ALL {
            for depth in PassDepth::ALL {
                out.push(Candidate::pass(formation, location, depth));
            }
        }
    }

    out
}
