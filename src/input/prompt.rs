/// Longest name the prompt accepts
pub const MAX_NAME_LEN: usize = 16;

/// Editable player-name field shown between games
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamePrompt {
    value: String,
    error: Option<String>,
}

impl NamePrompt {
    pub fn new(initial: &str) -> Self {
        let mut prompt = Self::default();
        for c in initial.trim().chars() {
            prompt.push(c);
        }
        prompt
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// Message from the last rejected submit
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn push(&mut self, c: char) {
        if self.value.chars().count() < MAX_NAME_LEN {
            self.value.push(c);
            self.error = None;
        }
    }

    pub fn pop(&mut self) {
        self.value.pop();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typing_and_erasing() {
        let mut prompt = NamePrompt::new("");
        prompt.push('A');
        prompt.push('l');
        prompt.pop();
        prompt.push('x');
        assert_eq!(prompt.value(), "Ax");
    }

    #[test]
    fn test_length_cap() {
        let mut prompt = NamePrompt::new(&"z".repeat(40));
        assert_eq!(prompt.value().len(), MAX_NAME_LEN);
        prompt.push('y');
        assert_eq!(prompt.value().len(), MAX_NAME_LEN);
    }

    #[test]
    fn test_error_cleared_on_edit() {
        let mut prompt = NamePrompt::new("  ");
        assert_eq!(prompt.value(), "");

        prompt.set_error("enter a player name to start");
        assert!(prompt.error().is_some());

        prompt.push('B');
        assert!(prompt.error().is_none());
    }
}
