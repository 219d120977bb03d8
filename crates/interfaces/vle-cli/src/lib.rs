pub mod commands;

use std::sync::Mutex;

use vle_app_core::Navigator;

/// Terminal stand-in for a page transition: announces the destination and
/// remembers it for the command report.
#[derive(Default)]
pub struct CliNavigator {
    last: Mutex<Option<String>>,
}

impl CliNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_destination(&self) -> Option<String> {
        self.last.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Navigator for CliNavigator {
    fn navigate(&self, path: &str) {
        println!(":: Redirecting to {path}");
        *self.last.lock().unwrap_or_else(|e| e.into_inner()) = Some(path.to_string());
    }
}
