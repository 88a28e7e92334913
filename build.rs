#[path = "build/config.rs"]
mod build_config;

use build_config::config::Cfgs;

fn main() {
    Cfgs::new().apply();
}
