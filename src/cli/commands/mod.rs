pub mod ledger;
pub mod system;

use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut entries = ledger::definitions();
    entries.extend(system::definitions());
    entries
}
