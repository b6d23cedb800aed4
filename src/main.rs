//! timepunch main entrypoint.

use timepunch::run;

fn main() {
    if let Err(e) = run() {
        timepunch::ui::messages::error(e.to_string());
        std::process::exit(1);
    }
}
