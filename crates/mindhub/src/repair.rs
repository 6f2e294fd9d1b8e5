/// One text rewrite applied to a model response
pub trait RepairStrategy: Send + Sync {
    fn repair(&self, text: String) -> String;
}

/// Strip leading and trailing whitespace
pub struct TrimWhitespace;

impl RepairStrategy for TrimWhitespace {
    fn repair(&self, text: String) -> String {
        let trimmed = text.trim();
        if trimmed.len() == text.len() {
            text
        } else {
            trimmed.to_string()
        }
    }
}

/// Some providers drop the opening brace of a requested JSON object
pub struct PrependOpeningBrace;

impl RepairStrategy for PrependOpeningBrace {
    fn repair(&self, text: String) -> String {
        if text.starts_with('{') {
            text
        } else {
            format!("{{{}", text)
        }
    }
}

/// Ordered repair steps, applied first to last
pub struct RepairPipeline {
    steps: Vec<Box<dyn RepairStrategy>>,
}

impl RepairPipeline {
    /// A pipeline that leaves text untouched
    pub fn empty() -> Self {
        Self { steps: Vec::new() }
    }

    pub fn with_step<R: RepairStrategy + 'static>(mut self, step: R) -> Self {
        self.steps.push(Box::new(step));
        self
    }

    pub fn apply(&self, text: &str) -> String {
        self.steps
            .iter()
            .fold(text.to_string(), |text, step| step.repair(text))
    }
}

impl Default for RepairPipeline {
    fn default() -> Self {
        Self::empty()
            .with_step(TrimWhitespace)
            .with_step(PrependOpeningBrace)
    }
}
