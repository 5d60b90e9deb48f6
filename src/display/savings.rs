//! Savings suggestion display

use crate::reports::SavingsSuggestion;

pub fn format_suggestions(suggestions: &[SavingsSuggestion]) -> String {
    if suggestions.is_empty() {
        return "No savings suggestions.\n".to_string();
    }

    let mut output = String::from("Savings Suggestions\n");
    output.push_str(&"-".repeat(40));
    output.push('\n');
    for suggestion in suggestions {
        output.push_str(&format!("• {}\n", suggestion.message));
        if suggestion.vendors.len() > 1 {
            output.push_str(&format!("    vendors: {}\n", suggestion.vendors.join(", ")));
        }
    }
    output
}
