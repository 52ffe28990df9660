//! Numbered step-by-step solutions.
//!
//! Steps are built from the values the generator already computed; the
//! composer never parses rendered math back.

use mcq_formatter::block;

/// One numbered step: a sentence followed by zero or more display-math
/// lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub description: String,
    pub math: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Explanation {
    steps: Vec<Step>,
    conclusion: Option<Step>,
}

impl Explanation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&mut self, description: impl Into<String>) -> &mut Self {
        self.steps.push(Step {
            description: description.into(),
            math: Vec::new(),
        });
        self
    }

    pub fn step_math(&mut self, description: impl Into<String>, math: impl Into<String>) -> &mut Self {
        self.steps.push(Step {
            description: description.into(),
            math: vec![math.into()],
        });
        self
    }

    pub fn step_lines(
        &mut self,
        description: impl Into<String>,
        math: impl IntoIterator<Item = String>,
    ) -> &mut Self {
        self.steps.push(Step {
            description: description.into(),
            math: math.into_iter().collect(),
        });
        self
    }

    /// Closing line after the numbered steps, e.g. `Therefore,` plus the
    /// final equation.
    pub fn conclude(&mut self, description: impl Into<String>, math: impl Into<String>) -> &mut Self {
        self.conclusion = Some(Step {
            description: description.into(),
            math: vec![math.into()],
        });
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Solution:");
        for (i, step) in self.steps.iter().enumerate() {
            out.push_str(&format!("\n\n{}) {}", i + 1, step.description));
            push_math(&mut out, &step.math);
        }
        if let Some(conclusion) = &self.conclusion {
            out.push_str(&format!("\n\n{}", conclusion.description));
            push_math(&mut out, &conclusion.math);
        }
        out
    }
}

fn push_math(out: &mut String, lines: &[String]) {
    for line in lines {
        out.push('\n');
        out.push_str(&block(line));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_numbered_steps_and_conclusion() {
        let mut e = Explanation::new();
        e.step_math("Square the legs", "3^2 + 4^2 = 25")
            .step("Take the square root")
            .conclude("Therefore,", "c = 5");
        assert_eq!(
            e.render(),
            "Solution:\n\n1) Square the legs\n\\[3^2 + 4^2 = 25\\]\n\n2) Take the square root\n\nTherefore,\n\\[c = 5\\]"
        );
        assert_eq!(e.steps().len(), 2);
    }

    #[test]
    fn multi_line_steps() {
        let mut e = Explanation::new();
        e.step_lines("Expand", vec!["a".to_string(), "b".to_string()]);
        assert_eq!(e.render(), "Solution:\n\n1) Expand\n\\[a\\]\n\\[b\\]");
    }
}
