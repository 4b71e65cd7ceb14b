use crate::types::indicator::Indicator;
use crate::types::phase::{IndicatorValue, Phase};
use crate::types::report::CompletionReport;

pub fn to_markdown(report: &CompletionReport) -> String {
    let completion = &report.completion;
    let mut output = String::new();
    output.push_str("# Context Completion Report\n\n");
    output.push_str(&format!(
        "Event: {} - {}\n\n",
        completion.start_year, completion.end_year
    ));

    output.push_str("## Phase Scores\n\n");
    for phase in Phase::ALL {
        if let Some(score) = completion.score(phase) {
            output.push_str(&format!("- {}: {:.3}\n", phase, score));
        }
    }
    output.push('\n');

    output.push_str("## Indicators\n\n");
    output.push_str("| indicator |");
    for phase in Phase::ALL {
        output.push_str(&format!(" {phase} |"));
    }
    output.push_str("\n|---|");
    for _ in Phase::ALL {
        output.push_str("---|");
    }
    output.push('\n');

    for indicator in Indicator::ALL {
        output.push_str(&format!("| {indicator} |"));
        for phase in Phase::ALL {
            match completion.value(phase, indicator) {
                Some(value) => output.push_str(&format!(" {} |", cell(value))),
                None => output.push_str(" - |"),
            }
        }
        output.push('\n');
    }

    output.push_str("\nMarkers: `*` inferred from neighbouring phases, `~` epoch default.\n");
    output
}

fn cell(value: IndicatorValue) -> String {
    let marker = match value {
        IndicatorValue::Present(_) => "",
        IndicatorValue::Inferred(_) => "*",
        IndicatorValue::Defaulted(_) => "~",
    };
    format!("{:.2}{marker}", value.value())
}
