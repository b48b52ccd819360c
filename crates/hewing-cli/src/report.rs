use hewing_core::ItemStack;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The script ran out of cuts before the piece completed.
    Incomplete,
    Finished,
    Ruined,
}

/// Result of one scripted session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionReport {
    pub log: String,
    pub recipe: String,
    /// Recipe codes offered when the log went in.
    pub choices: Vec<String>,
    pub strikes: usize,
    pub outcome: Outcome,
    pub remaining_wood: usize,
    pub emitted: Vec<ItemStack>,
    pub sounds: Vec<String>,
}

impl SessionReport {
    pub fn new(log: &str, recipe: &str) -> Self {
        Self {
            log: log.to_string(),
            recipe: recipe.to_string(),
            choices: Vec::new(),
            strikes: 0,
            outcome: Outcome::Incomplete,
            remaining_wood: 0,
            emitted: Vec::new(),
            sounds: Vec::new(),
        }
    }
}

pub fn format_json(report: &SessionReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

/// Plain-text summary for the terminal.
pub fn format_text(report: &SessionReport) -> String {
    let mut out = String::new();
    out.push_str(&format!("log:      {}\n", report.log));
    out.push_str(&format!("recipe:   {}\n", report.recipe));
    out.push_str(&format!("choices:  {}\n", report.choices.join(", ")));
    out.push_str(&format!("strikes:  {}\n", report.strikes));
    out.push_str(&format!("outcome:  {:?}\n", report.outcome));
    if report.outcome == Outcome::Incomplete {
        out.push_str(&format!("wood left: {}\n", report.remaining_wood));
    }
    for stack in &report.emitted {
        out.push_str(&format!("emitted:  {} x{}\n", stack.code, stack.quantity));
    }
    for sound in &report.sounds {
        out.push_str(&format!("sound:    {sound}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn finished() -> SessionReport {
        let mut report = SessionReport::new("game:log-placed-oak-ud", "beam-oak");
        report.choices = vec!["beam-oak".into(), "post-oak".into()];
        report.strikes = 12;
        report.outcome = Outcome::Finished;
        report.emitted.push(ItemStack::new("game:beam-oak", 1));
        report
    }

    #[test]
    fn test_format_text() {
        let text = format_text(&finished());
        assert!(text.contains("choices:  beam-oak, post-oak"));
        assert!(text.contains("outcome:  Finished"));
        assert!(text.contains("emitted:  game:beam-oak x1"));
        assert!(!text.contains("wood left"));
    }

    #[test]
    fn test_format_json() {
        let json = format_json(&finished()).expect("report serializes");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["outcome"], "finished");
        assert_eq!(value["strikes"], 12);
        assert_eq!(value["emitted"][0]["code"], "game:beam-oak");
    }
}
