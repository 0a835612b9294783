//! Host test utilities

use std::sync::Mutex;

use results_page::page::host::{Host, HostCommand, HostError};

/// Host that records commands instead of running them
#[derive(Default)]
pub struct RecordingHost {
    commands: Mutex<Vec<HostCommand>>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> Vec<HostCommand> {
        self.commands.lock().unwrap().clone()
    }
}

impl Host for RecordingHost {
    fn run(&self, command: &HostCommand) -> Result<(), HostError> {
        self.commands.lock().unwrap().push(command.clone());
        Ok(())
    }
}
