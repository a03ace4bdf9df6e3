use crate::client::ApiResponse;
use crate::report::console;
use crate::runner::state::{FlowReport, StepOutcome};
use crate::steps::Harness;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;

/// Identifiers pulled from one response to build a later request.
///
/// Lives for a single flow execution only.
#[derive(Debug, Default)]
pub struct Captures {
    values: HashMap<String, String>,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Save the value at a dot path (`content.0.id`) of a JSON response
    pub fn capture(&mut self, name: &str, response: &ApiResponse, json_path: &str) -> Option<String> {
        let json = response.json()?;
        let pointer = format!("/{}", json_path.replace('.', "/"));

        let value = match json.pointer(&pointer) {
            None | Some(Value::Null) => {
                log::debug!("JSON path '{}' not found in response", json_path);
                return None;
            }
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        log::debug!("Captured {} = {}", name, value);
        self.values.insert(name.to_string(), value.clone());
        Some(value)
    }

    pub fn set(&mut self, name: &str, value: &str) {
        self.values.insert(name.to_string(), value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

pub type StepFn = Box<dyn Fn(&mut Harness, &mut Captures) -> StepOutcome>;

/// One entry of a flow: a name plus the closure that runs the step
pub struct StepDescriptor {
    pub name: String,
    /// Separator title printed before this step
    pub section: Option<String>,
    run: StepFn,
}

/// A fixed, ordered scenario made of step descriptors
pub struct Flow {
    pub name: String,
    steps: Vec<StepDescriptor>,
    notes: Vec<String>,
    pending_section: Option<String>,
}

impl Flow {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            steps: Vec::new(),
            notes: Vec::new(),
            pending_section: None,
        }
    }

    /// Start a titled section; applies to the next step added
    pub fn section(mut self, title: &str) -> Self {
        self.pending_section = Some(title.to_string());
        self
    }

    pub fn step<F>(mut self, name: &str, run: F) -> Self
    where
        F: Fn(&mut Harness, &mut Captures) -> StepOutcome + 'static,
    {
        self.steps.push(StepDescriptor {
            name: name.to_string(),
            section: self.pending_section.take(),
            run: Box::new(run),
        });
        self
    }

    /// Line printed after the summary, e.g. how to resume a paused flow
    pub fn note(mut self, line: &str) -> Self {
        self.notes.push(line.to_string());
        self
    }

    pub fn steps(&self) -> impl Iterator<Item = &StepDescriptor> {
        self.steps.iter()
    }

    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Keep only the named steps, in flow order
    pub fn only(mut self, names: &[String]) -> Self {
        if names.is_empty() {
            return self;
        }
        self.steps.retain(|s| names.iter().any(|n| n == &s.name));
        self
    }

    /// Run every step in order. A failing step never stops the flow.
    pub fn run(&self, harness: &mut Harness) -> FlowReport {
        let started = Instant::now();
        let mut captures = Captures::new();
        let mut outcomes = Vec::with_capacity(self.steps.len());

        console::flow_banner(&self.name, &harness.config);

        for step in &self.steps {
            if let Some(title) = &step.section {
                console::separator(title);
            }
            log::debug!("Running step '{}'", step.name);
            outcomes.push((step.run)(harness, &mut captures));
        }

        let report = FlowReport {
            flow_name: self.name.clone(),
            outcomes,
            notes: self.notes.clone(),
            duration_ms: started.elapsed().as_millis() as u64,
        };
        console::flow_summary(&report);
        report
    }
}
