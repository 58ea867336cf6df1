use std::collections::VecDeque;

/// Messages shown in the strip below the grid. The newest message is shown
/// after the editor summary; an active prompt replaces the message.
pub struct StatusLine {
    messages: VecDeque<String>,
    max_messages: usize,
    prompt: Option<String>,
}

impl StatusLine {
    pub fn new(max_messages: usize) -> Self {
        let mut status = Self {
            messages: VecDeque::new(),
            max_messages: max_messages.max(1),
            prompt: None,
        };

        status.add_message("Click or drag to paint. G guide, C clear, 1-9 palette, arrows resize.");
        status
    }

    pub fn add_message(&mut self, message: &str) {
        log::info!("{}", message);
        self.messages.push_back(message.to_string());
        while self.messages.len() > self.max_messages {
            self.messages.pop_front();
        }
    }

    pub fn add_error(&mut self, error: &str) {
        log::warn!("{}", error);
        self.messages.push_back(format!("Error: {}", error));
        while self.messages.len() > self.max_messages {
            self.messages.pop_front();
        }
    }

    pub fn set_prompt(&mut self, prompt: &str) {
        log::info!("{}", prompt);
        self.prompt = Some(prompt.to_string());
    }

    pub fn take_prompt(&mut self) -> Option<String> {
        self.prompt.take()
    }

    pub fn has_prompt(&self) -> bool {
        self.prompt.is_some()
    }

    pub fn latest(&self) -> Option<&str> {
        self.messages.back().map(String::as_str)
    }

    /// Text for the status strip: `summary` followed by the prompt or the
    /// newest message.
    pub fn display_text(&self, summary: &str) -> String {
        match self.prompt.as_deref().or_else(|| self.latest()) {
            Some(tail) => format!("{}  |  {}", summary, tail),
            None => summary.to_string(),
        }
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new(20)
    }
}
