//! Scripted replay of widget events.
//!
//! A script is JSON lines, one event per line:
//!
//! ```text
//! {"event": "focus"}
//! {"event": "type", "value": "fr"}
//! {"event": "key", "code": 40}
//! {"event": "advance", "ms": 200}
//! ```

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::Path;
use std::process;
use std::rc::Rc;
use std::time::Duration;

use combo_core::settings::{load_settings, SettingsError};
use combo_engine::{
    BuildError, RelatedTarget, SubstringSource, Widget, WidgetBuilder, WidgetSettings,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

const WIDGET_ID: &str = "combo";

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("script line {line}: {source}")]
    Script {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Where focus went when an option lost it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Related {
    Input,
    Option(usize),
    #[default]
    Outside,
}

impl From<Related> for RelatedTarget {
    fn from(r: Related) -> Self {
        match r {
            Related::Input => RelatedTarget::Input,
            Related::Option(i) => RelatedTarget::Option(i),
            Related::Outside => RelatedTarget::Outside,
        }
    }
}

fn on_input_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScriptEvent {
    Focus,
    Blur,
    Type {
        value: String,
    },
    /// Pointer click on the input.
    Click,
    Key {
        code: u16,
        #[serde(default = "on_input_default")]
        on_input: bool,
    },
    OptionFocus {
        index: usize,
    },
    OptionBlur {
        index: usize,
        #[serde(default)]
        related: Related,
    },
    Hover {
        index: usize,
    },
    Leave,
    OptionClick {
        index: usize,
    },
    Remove {
        index: usize,
    },
    /// The input's value was written from outside the widget.
    External {
        value: String,
    },
    Advance {
        ms: u64,
    },
}

impl ScriptEvent {
    fn label(&self) -> String {
        match self {
            Self::Focus => "focus".to_string(),
            Self::Blur => "blur".to_string(),
            Self::Type { value } => format!("type {value:?}"),
            Self::Click => "click".to_string(),
            Self::Key { code, on_input } => {
                let target = if *on_input { "input" } else { "option" };
                format!("key {code} on {target}")
            }
            Self::OptionFocus { index } => format!("option_focus {index}"),
            Self::OptionBlur { index, related } => format!("option_blur {index} -> {related:?}"),
            Self::Hover { index } => format!("hover {index}"),
            Self::Leave => "leave".to_string(),
            Self::OptionClick { index } => format!("option_click {index}"),
            Self::Remove { index } => format!("remove {index}"),
            Self::External { value } => format!("external {value:?}"),
            Self::Advance { ms } => format!("advance {ms}ms"),
        }
    }
}

/// Widget state after one replayed event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub step: usize,
    pub event: String,
    pub at_ms: u128,
    pub query: String,
    pub options: Vec<String>,
    pub menu_open: bool,
    pub selected: Option<usize>,
    pub active_descendant: Option<String>,
    pub move_focus_to: Option<String>,
    pub prevent_default: bool,
    pub status: String,
    pub confirmed: Vec<String>,
    pub selected_options: Vec<String>,
    pub fired: Vec<String>,
}

pub struct Replay {
    widget: Widget<String>,
    confirmed: Rc<RefCell<Vec<String>>>,
    step: usize,
}

impl Replay {
    pub fn new(options: Vec<String>, settings: WidgetSettings) -> Result<Self, ReplayError> {
        let confirmed: Rc<RefCell<Vec<String>>> = Rc::default();
        let log = Rc::clone(&confirmed);
        let widget = WidgetBuilder::plain()
            .id(WIDGET_ID)
            .source(SubstringSource::from_values(options))
            .settings(settings)
            .on_confirm(move |o: &String| log.borrow_mut().push(o.clone()))
            .build()?;
        Ok(Self {
            widget,
            confirmed,
            step: 0,
        })
    }

    pub fn apply(&mut self, event: &ScriptEvent) -> Snapshot {
        let w = &mut self.widget;
        let mut fired = Vec::new();
        let outcome = match event {
            ScriptEvent::Focus => w.input_focus(),
            ScriptEvent::Blur => w.input_blur(),
            ScriptEvent::Type { value } => w.input_changed(value),
            ScriptEvent::Click => w.input_click(),
            ScriptEvent::Key { code, on_input } => w.key_down(*code, *on_input),
            ScriptEvent::OptionFocus { index } => w.option_focus(*index),
            ScriptEvent::OptionBlur { index, related } => w.option_blur(*index, (*related).into()),
            ScriptEvent::Hover { index } => w.option_hover(*index),
            ScriptEvent::Leave => w.list_pointer_leave(),
            ScriptEvent::OptionClick { index } => w.option_click(*index),
            ScriptEvent::Remove { index } => w.remove_selected(*index),
            ScriptEvent::External { value } => w.external_value_changed(value),
            ScriptEvent::Advance { ms } => {
                let now = w.now() + Duration::from_millis(*ms);
                fired = w.advance(now).iter().map(|k| format!("{k:?}")).collect();
                Default::default()
            }
        };

        self.step += 1;
        let state = w.state();
        let ids = w.element_ids();
        let move_focus_to = outcome
            .focus
            .and_then(|request| ids.registry(state.options.len()).resolve(&request).cloned());
        Snapshot {
            step: self.step,
            event: event.label(),
            at_ms: w.now().as_millis(),
            query: state.query.clone(),
            options: state.options.clone(),
            menu_open: state.menu_open,
            selected: state.selected,
            active_descendant: w.view().active_descendant.map(|i| ids.option(i)),
            move_focus_to,
            prevent_default: outcome.prevent_default,
            status: w.status().to_string(),
            confirmed: self.confirmed.borrow_mut().drain(..).collect(),
            selected_options: state.selected_options.clone(),
            fired,
        }
    }
}

/// One option per non-blank line.
pub fn parse_options(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

/// Parse a JSON-lines script. Blank lines are skipped; line numbers in
/// errors are 1-based.
pub fn parse_script(content: &str) -> Result<Vec<ScriptEvent>, ReplayError> {
    content
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty())
        .map(|(i, l)| {
            serde_json::from_str(l).map_err(|source| ReplayError::Script {
                line: i + 1,
                source,
            })
        })
        .collect()
}

fn read(path: &Path) -> Result<String, ReplayError> {
    fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn run_replay(
    options_file: &Path,
    script_file: &Path,
    settings_file: Option<&Path>,
) -> Result<Vec<Snapshot>, ReplayError> {
    let options = parse_options(&read(options_file)?);
    let script = parse_script(&read(script_file)?)?;
    let settings = match settings_file {
        Some(path) => load_settings(path)?,
        None => WidgetSettings::default(),
    };
    let mut replay = Replay::new(options, settings)?;
    Ok(script.iter().map(|event| replay.apply(event)).collect())
}

pub fn render_text(s: &Snapshot) -> String {
    let menu = if s.menu_open { "open" } else { "closed" };
    let mut line = format!(
        "#{:>3} {:>6}ms {:<28} query={:?} menu={menu} options={:?}",
        s.step, s.at_ms, s.event, s.query, s.options
    );
    if let Some(i) = s.selected {
        line.push_str(&format!(" selected={i}"));
    }
    if let Some(target) = &s.move_focus_to {
        line.push_str(&format!(" focus->{target}"));
    }
    if !s.confirmed.is_empty() {
        line.push_str(&format!(" confirmed={:?}", s.confirmed));
    }
    if !s.fired.is_empty() {
        line.push_str(&format!(" fired={:?}", s.fired));
    }
    line.push_str(&format!(" status={:?}", s.status));
    line
}

pub fn replay_cmd(options_file: &str, script_file: &str, settings: Option<&str>, json: bool) {
    let snapshots = die!(
        run_replay(
            Path::new(options_file),
            Path::new(script_file),
            settings.map(Path::new),
        ),
        "Error: {}"
    );
    for snapshot in &snapshots {
        if json {
            println!(
                "{}",
                die!(serde_json::to_string(snapshot), "Error encoding snapshot: {}")
            );
        } else {
            println!("{}", render_text(snapshot));
        }
    }
}
