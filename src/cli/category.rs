//! Category CLI command
//!
//! Lists the fixed category vocabulary of each kind.

use crate::models::Kind;

/// Render the category list, with the label each category is stored under
pub fn format_category_list() -> String {
    let mut output = String::new();
    for kind in Kind::all() {
        output.push_str(&format!("{} ({})\n", kind, kind.stored_label()));
        for category in kind.categories() {
            output.push_str(&format!(
                "  {:<14} {}\n",
                category.name(),
                category.stored_label()
            ));
        }
    }
    output
}

/// Handle `categories`
pub fn handle_categories_command() {
    print!("{}", format_category_list());
}
