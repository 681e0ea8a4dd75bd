use std::fs;
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::time_point::{TimePoint, Timestamp, Value};
use crate::timeline::UsageTimeline;
use crate::Result;

/// A timeline script: a baseline and the operations applied to it in order.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    #[serde(default)]
    pub baseline: Value,
    #[serde(default)]
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    AddUsage {
        start: Timestamp,
        end: Timestamp,
        value: Value,
    },
    RemoveTillEnd {
        start: Timestamp,
        value: Value,
    },
    WhenNotAbove {
        after: Timestamp,
        duration: Timestamp,
        max_value: Value,
    },
    ValueAt {
        time: Timestamp,
    },
}

/// Result line of a query operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Outcome {
    WhenNotAbove { result: Option<Timestamp> },
    ValueAt { result: Value },
}

/// Final state of a replayed timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub baseline: Value,
    pub breakpoints: Vec<TimePoint>,
}

impl Snapshot {
    pub fn from(timeline: &UsageTimeline) -> Snapshot {
        Snapshot {
            baseline: timeline.baseline(),
            breakpoints: timeline
                .breakpoints()
                .filter_map(|(key, value)| key.time().map(|t| TimePoint::new(t, value)))
                .collect(),
        }
    }
}

impl Script {
    pub fn parse(content: &str) -> Result<Script> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_file(path: &Path) -> Result<Script> {
        let content = fs::read_to_string(path)?;
        let script = Script::parse(&content)?;
        info!(
            "loaded {} operations from {}",
            script.operations.len(),
            path.display()
        );
        Ok(script)
    }
}

/// Drive timelines from scripts.
///
/// Every query outcome is written to `out` as one JSON line as soon as it is computed,
/// so the lines before a failing operation are kept.
pub struct Replayer<W: Write> {
    out: W,
}

impl<W: Write> Replayer<W> {
    pub fn new(out: W) -> Replayer<W> {
        Replayer { out }
    }

    pub fn replay(&mut self, script: &Script) -> Result<UsageTimeline> {
        let mut timeline = UsageTimeline::new(script.baseline);
        for (idx, op) in script.operations.iter().enumerate() {
            debug!("operation #{}: {:?}", idx, op);
            if let Some(outcome) = apply(&mut timeline, op)? {
                self.emit(&outcome)?;
            }
        }
        Ok(timeline)
    }

    pub fn dump(&mut self, timeline: &UsageTimeline) -> Result<()> {
        self.emit(&Snapshot::from(timeline))
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit<S: Serialize>(&mut self, line: &S) -> Result<()> {
        serde_json::to_writer(&mut self.out, line)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

/// Apply one operation, returning the outcome of queries.
pub fn apply(timeline: &mut UsageTimeline, op: &Operation) -> Result<Option<Outcome>> {
    match *op {
        Operation::AddUsage { start, end, value } => {
            timeline.add_usage(start, end, value)?;
            Ok(None)
        }
        Operation::RemoveTillEnd { start, value } => {
            timeline.remove_till_end(start, value)?;
            Ok(None)
        }
        Operation::WhenNotAbove {
            after,
            duration,
            max_value,
        } => Ok(Some(Outcome::WhenNotAbove {
            result: timeline.when_not_above(after, duration, max_value)?,
        })),
        Operation::ValueAt { time } => Ok(Some(Outcome::ValueAt {
            result: timeline.value_at(time),
        })),
    }
}

#[cfg(test)]
mod tests {
    use crate::replay::{Operation, Replayer, Script};
    use crate::TimelineErr;

    const SCENARIO: &str = r#"
baseline: 0
operations:
  - op: add_usage
    start: 10
    end: 20
    value: 5
  - op: add_usage
    start: 15
    end: 25
    value: 3
  - op: value_at
    time: 15
  - op: when_not_above
    after: 10
    duration: 5
    max_value: 4
  - op: when_not_above
    after: 0
    duration: 1
    max_value: -1
"#;

    #[test]
    pub fn test_parse_script() {
        let script = Script::parse(SCENARIO).unwrap();
        assert_eq!(script.baseline, 0.0);
        assert_eq!(script.operations.len(), 5);
        assert_eq!(
            script.operations[0],
            Operation::AddUsage {
                start: 10,
                end: 20,
                value: 5.0
            }
        );
        assert_eq!(script.operations[3], Operation::WhenNotAbove {
            after: 10,
            duration: 5,
            max_value: 4.0
        });
    }

    #[test]
    pub fn test_parse_json_script() {
        let script = Script::parse(
            r#"{"baseline": 2.5, "operations": [{"op": "remove_till_end", "start": 3, "value": 1}]}"#,
        )
        .unwrap();
        assert_eq!(script.baseline, 2.5);
        assert_eq!(
            script.operations,
            vec![Operation::RemoveTillEnd {
                start: 3,
                value: 1.0
            }]
        );
    }

    #[test]
    pub fn test_unknown_operation() {
        let res = Script::parse("operations:\n  - op: reset\n");
        match res {
            Err(TimelineErr::ScriptErr(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    pub fn test_replay_scenario() {
        let script = Script::parse(SCENARIO).unwrap();
        let mut replayer = Replayer::new(Vec::new());
        let timeline = replayer.replay(&script).unwrap();
        replayer.dump(&timeline).unwrap();

        let out = String::from_utf8(replayer.into_inner()).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                r#"{"op":"value_at","result":8.0}"#,
                r#"{"op":"when_not_above","result":20}"#,
                r#"{"op":"when_not_above","result":null}"#,
                r#"{"baseline":0.0,"breakpoints":[{"timestamp":10,"value":5.0},{"timestamp":15,"value":8.0},{"timestamp":20,"value":3.0},{"timestamp":25,"value":0.0}]}"#,
            ]
        );
    }

    #[test]
    pub fn test_replay_near_time_limit() {
        let script = Script::parse(
            "operations:\n  - op: when_not_above\n    after: 18446744073709551614\n    duration: 5\n    max_value: 1\n",
        )
        .unwrap();
        let mut replayer = Replayer::new(Vec::new());
        replayer.replay(&script).unwrap();
        let out = String::from_utf8(replayer.into_inner()).unwrap();
        assert_eq!(
            out,
            "{\"op\":\"when_not_above\",\"result\":18446744073709551614}\n"
        );
    }

    #[test]
    pub fn test_replay_keeps_output_before_error() {
        let script = Script::parse(
            "operations:\n  - op: value_at\n    time: 3\n  - op: add_usage\n    start: 9\n    end: 4\n    value: 1\n",
        )
        .unwrap();
        let mut replayer = Replayer::new(Vec::new());
        match replayer.replay(&script) {
            Err(TimelineErr::InvalidArgument(_)) => {}
            other => panic!("unexpected {:?}", other),
        }
        let out = String::from_utf8(replayer.into_inner()).unwrap();
        assert_eq!(out, "{\"op\":\"value_at\",\"result\":0.0}\n");
    }
}
