//! PacePower main entrypoint.

use pacepower::run;
use pacepower::ui::messages::error;

fn main() {
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
