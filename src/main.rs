//! crewledger main entrypoint.

use crewledger::run;
use crewledger::ui::messages;

fn main() {
    if let Err(e) = run() {
        messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
