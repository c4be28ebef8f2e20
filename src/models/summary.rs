use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub uploaded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Uploaded {} emojis. ({} already existed)",
            self.uploaded, self.skipped
        )?;
        if self.failed > 0 {
            write!(f, "\n{} emojis failed.", self.failed)?;
        }
        Ok(())
    }
}
