use stayhub_core::steps_for;
use stayhub_domain::PropertyCategory;

use crate::cli::output;

pub fn outline(category: PropertyCategory) -> String {
    steps_for(category)
        .iter()
        .enumerate()
        .map(|(index, step)| format!("{:>2}. {}", index + 1, step.title))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_steps(category: PropertyCategory) {
    output::section(format!("{category} onboarding"));
    output::info(outline(category));
}
