use parking_lot::Mutex;

/// The single-file input the form reads selections from.
pub trait FilePicker: Send + Sync {
    fn show(&self, filename: &str);

    /// Empties the input so picking the same file again registers as a new selection.
    fn reset(&self);

    fn value(&self) -> Option<String>;
}

#[derive(Debug, Default)]
pub struct PickerState {
    value: Mutex<Option<String>>,
}

impl PickerState {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FilePicker for PickerState {
    fn show(&self, filename: &str) {
        *self.value.lock() = Some(filename.to_string());
    }

    fn reset(&self) {
        *self.value.lock() = None;
    }

    fn value(&self) -> Option<String> {
        self.value.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_and_reset() {
        let picker = PickerState::new();
        assert_eq!(picker.value(), None);

        picker.show("reads.fastq");
        assert_eq!(picker.value().as_deref(), Some("reads.fastq"));

        picker.reset();
        assert_eq!(picker.value(), None);
    }
}
