//! Terminal output formatting with colors
//!
//! Respects NO_COLOR, CLICOLOR, CLICOLOR_FORCE automatically.

use colored::Colorize;
use termtree::Tree;

use crate::application::services::CompetitionTree;
use crate::infrastructure::traits::Notifier;

/// Print error (red bold "error:" prefix) to stderr
pub fn error(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

/// Print warning (yellow "Warning:" prefix) to stderr
pub fn warning(msg: &(impl std::fmt::Display + ?Sized)) {
    eprintln!("{}: {}", "Warning".yellow(), msg);
}

/// Print success status (green checkmark)
pub fn success(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// Print section header (cyan bold)
pub fn header(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg.to_string().cyan().bold());
}

/// Print indented detail (no color)
pub fn detail(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("  {}", msg);
}

/// Print plain output (no color, for data)
pub fn info(msg: &(impl std::fmt::Display + ?Sized)) {
    println!("{}", msg);
}

/// Notifications rendered on the terminal.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn info(&self, msg: &str) {
        success(msg);
    }

    fn warning(&self, msg: &str) {
        warning(msg);
    }

    fn error(&self, msg: &str) {
        error(msg);
    }
}

/// Render the whole tree by pulling roots, then each root's children.
pub fn render_tree(tree: &CompetitionTree) -> Tree<String> {
    let roots = tree.roots();
    if roots.is_empty() {
        return Tree::new("No competitions".to_string());
    }

    let leaves: Vec<Tree<String>> = roots
        .iter()
        .map(|root| {
            let children = tree
                .children(root)
                .iter()
                .map(|child| Tree::new(child.to_string()))
                .collect::<Vec<_>>();
            Tree::new(root.to_string()).with_leaves(children)
        })
        .collect();

    Tree::new("Competitions".bold().to_string()).with_leaves(leaves)
}
