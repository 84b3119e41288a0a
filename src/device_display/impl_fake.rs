use crate::device_display::interface::{DeviceDisplay, ScanScreen};
use std::error::Error;
use std::sync::{Arc, Mutex, PoisonError};

/// Remembers every screen it was asked to show.
#[derive(Clone, Default)]
pub struct DeviceDisplayFake {
    screens: Arc<Mutex<Vec<ScanScreen>>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screens(&self) -> Vec<ScanScreen> {
        self.screens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<ScanScreen> {
        self.screens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn show(&mut self, screen: &ScanScreen) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.screens
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(screen.clone());
        Ok(())
    }
}
