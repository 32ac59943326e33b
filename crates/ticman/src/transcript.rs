//! Accumulated output of a run.

/// One executed step's contribution to the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub description: String,
    pub output: String,
}

/// The combined output of every step executed in the current run, in
/// execution order.
///
/// Only [`record`](Transcript::record) adds to it and only
/// [`clear`](Transcript::clear) removes from it, so while a run is in progress
/// each rendered text is a prefix of every later one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    segments: Vec<Segment>,
    text: String,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step's header line and its captured output.
    pub fn record(&mut self, description: &str, output: &str) {
        self.text.push_str(">>> ");
        self.text.push_str(description);
        self.text.push('\n');
        self.text.push_str(output);
        self.text.push('\n');
        self.segments.push(Segment {
            description: description.to_string(),
            output: output.to_string(),
        });
    }

    /// Everything recorded so far, as shown in the log viewport.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn clear(&mut self) {
        self.segments.clear();
        self.text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_header_then_output() {
        let mut t = Transcript::new();
        t.record("Cloning Repository...", "Cloning into 'TIC-80'...\n");
        t.record("Compiling...", "");
        assert_eq!(
            t.text(),
            ">>> Cloning Repository...\nCloning into 'TIC-80'...\n\n>>> Compiling...\n\n"
        );
        assert_eq!(t.segments().len(), 2);
        assert_eq!(t.segments()[1].description, "Compiling...");
    }

    #[test]
    fn each_text_is_a_prefix_of_the_next() {
        let mut t = Transcript::new();
        let mut previous = t.text().to_string();
        for i in 0..5 {
            t.record(&format!("step {i}"), &format!("out {i}"));
            assert!(t.text().starts_with(&previous));
            previous = t.text().to_string();
        }
    }

    #[test]
    fn clear_empties_everything() {
        let mut t = Transcript::new();
        t.record("a", "b");
        t.clear();
        assert!(t.is_empty());
        assert_eq!(t.text(), "");
    }
}
