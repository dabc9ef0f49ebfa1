//! Interactive setup wizard as a pure state machine
//!
//! [`transition`] maps `(state, input)` to `(state, effects)` and never does
//! I/O. The terminal driver in the binary renders [`prompt`], reads a line,
//! turns it into an [`Input`] with [`parse_line`], and carries out the
//! returned [`Effect`]s.

use crosshair_types::{Config, Rgb, Shape};

use crate::monitor::{Monitor, PRIMARY_MONITOR};

pub const SIZE_LIMITS: (i32, i32) = (1, 100);
pub const THICKNESS_LIMITS: (i32, i32) = (1, 20);
pub const GAP_LIMITS: (i32, i32) = (0, 50);
pub const OFFSET_LIMITS: (i32, i32) = (-500, 500);

/// Outline thickness used when the outline is switched on
const WIZARD_OUTLINE_THICKNESS: i32 = 1;

pub const COLOR_PRESETS: [(&str, &str); 7] = [
    ("Green", "#00FF00"),
    ("Red", "#FF0000"),
    ("White", "#FFFFFF"),
    ("Cyan", "#00FFFF"),
    ("Yellow", "#FFFF00"),
    ("Pink", "#FF00FF"),
    ("Orange", "#FFA500"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Shape,
    Color,
    Size,
    Thickness,
    Gap,
    Outline,
    OutlineColor,
    Monitor,
    OffsetX,
    OffsetY,
    Confirm,
    StartPrompt,
    Finished,
}

impl Step {
    /// Steps answered by picking from a numbered list
    pub fn is_selection(self) -> bool {
        matches!(
            self,
            Step::Shape | Step::Outline | Step::Monitor | Step::Confirm | Step::StartPrompt
        )
    }

    pub fn is_color(self) -> bool {
        matches!(self, Step::Color | Step::OutlineColor)
    }
}

/// One line of user input, already classified
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Zero-based option index
    Choose(usize),
    /// Free text; empty means "use the default"
    Value(String),
    Back,
    Quit,
    /// The driver could not carry out [`Effect::Save`]
    SaveFailed(String),
}

/// Work the driver must perform after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Save(Config),
    Exit { start: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wizard {
    pub step: Step,
    pub config: Config,
    pub monitor_count: usize,
    pub error: Option<String>,
    pub saved: bool,
    pub start: bool,
}

impl Wizard {
    pub fn new(monitor_count: usize) -> Self {
        Self {
            step: Step::Shape,
            config: Config::default(),
            monitor_count,
            error: None,
            saved: false,
            start: false,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.step == Step::Finished
    }

    fn shape(&self) -> Shape {
        Shape::from_name(&self.config.crosshair.shape)
    }

    fn goto(mut self, step: Step) -> Self {
        self.step = step;
        self.error = None;
        self
    }

    fn reject(mut self, message: impl Into<String>) -> (Self, Vec<Effect>) {
        self.error = Some(message.into());
        (self, Vec::new())
    }

    fn previous(&self) -> Step {
        match self.step {
            Step::Shape => Step::Shape,
            Step::Color => Step::Shape,
            Step::Size => Step::Color,
            Step::Thickness => Step::Size,
            Step::Gap => Step::Thickness,
            Step::Outline if self.shape().has_arms() => Step::Gap,
            Step::Outline => Step::Size,
            Step::OutlineColor => Step::Outline,
            Step::Monitor if self.config.crosshair.outline_thickness > 0 => Step::OutlineColor,
            Step::Monitor => Step::Outline,
            Step::OffsetX => Step::Monitor,
            Step::OffsetY => Step::OffsetX,
            Step::Confirm => Step::OffsetY,
            // saved already; going back would suggest otherwise
            Step::StartPrompt => Step::StartPrompt,
            Step::Finished => Step::Finished,
        }
    }
}

/// Number of options offered by a selection step
pub fn option_count(state: &Wizard) -> usize {
    match state.step {
        Step::Shape => Shape::ALL.len(),
        Step::Color | Step::OutlineColor => COLOR_PRESETS.len(),
        Step::Outline => 2,
        Step::Monitor => state.monitor_count + 1,
        Step::Confirm => 3,
        Step::StartPrompt => 2,
        _ => 0,
    }
}

fn parse_bounded(text: &str, default: i32, (min, max): (i32, i32)) -> Result<i32, String> {
    let text = text.trim();
    let value = if text.is_empty() {
        Ok(default)
    } else {
        text.parse::<i32>()
    };
    match value {
        Ok(v) if (min..=max).contains(&v) => Ok(v),
        _ => Err(format!("enter a number between {min} and {max}")),
    }
}

fn parse_color(text: &str) -> Result<String, String> {
    let text = text.trim();
    let color = if text.starts_with('#') {
        text.to_string()
    } else {
        format!("#{text}")
    };
    color
        .parse::<Rgb>()
        .map(|_| color)
        .map_err(|_| "invalid color format".to_string())
}

fn pick_color(input: Input) -> Result<String, String> {
    match input {
        Input::Choose(i) => COLOR_PRESETS
            .get(i)
            .map(|(_, hex)| hex.to_string())
            .ok_or_else(|| "choose a listed color or type a hex value".to_string()),
        Input::Value(text) => parse_color(&text),
        _ => Err("choose a listed color or type a hex value".to_string()),
    }
}

/// Advance the wizard by one input
pub fn transition(state: Wizard, input: Input) -> (Wizard, Vec<Effect>) {
    match input {
        Input::Quit => {
            let state = state.goto(Step::Finished);
            return (state, vec![Effect::Exit { start: false }]);
        }
        Input::Back => {
            let step = state.previous();
            return (state.goto(step), Vec::new());
        }
        Input::SaveFailed(message) => {
            let mut state = state.goto(Step::Confirm);
            state.saved = false;
            state.error = Some(message);
            return (state, Vec::new());
        }
        Input::Choose(_) | Input::Value(_) => {}
    }

    let mut state = state;
    match state.step {
        Step::Shape => match input {
            Input::Choose(i) if i < Shape::ALL.len() => {
                state.config.crosshair.shape = Shape::ALL[i].name().to_string();
                (state.goto(Step::Color), Vec::new())
            }
            _ => state.reject("choose one of the listed shapes"),
        },

        Step::Color => match pick_color(input) {
            Ok(color) => {
                state.config.crosshair.color = color;
                (state.goto(Step::Size), Vec::new())
            }
            Err(e) => state.reject(e),
        },

        Step::Size => match value_of(input, 10, SIZE_LIMITS) {
            Ok(size) => {
                state.config.crosshair.size = size;
                let next = if state.shape().has_arms() {
                    Step::Thickness
                } else {
                    Step::Outline
                };
                (state.goto(next), Vec::new())
            }
            Err(e) => state.reject(e),
        },

        Step::Thickness => match value_of(input, 2, THICKNESS_LIMITS) {
            Ok(thickness) => {
                state.config.crosshair.thickness = thickness;
                (state.goto(Step::Gap), Vec::new())
            }
            Err(e) => state.reject(e),
        },

        Step::Gap => match value_of(input, 0, GAP_LIMITS) {
            Ok(gap) => {
                state.config.crosshair.gap = gap;
                (state.goto(Step::Outline), Vec::new())
            }
            Err(e) => state.reject(e),
        },

        Step::Outline => match input {
            Input::Choose(0) => {
                state.config.crosshair.outline_thickness = 0;
                (state.goto(Step::Monitor), Vec::new())
            }
            Input::Choose(1) => {
                state.config.crosshair.outline_thickness = WIZARD_OUTLINE_THICKNESS;
                (state.goto(Step::OutlineColor), Vec::new())
            }
            _ => state.reject("choose No or Yes"),
        },

        Step::OutlineColor => match pick_color(input) {
            Ok(color) => {
                state.config.crosshair.outline_color = color;
                (state.goto(Step::Monitor), Vec::new())
            }
            Err(e) => state.reject(e),
        },

        Step::Monitor => match input {
            Input::Choose(0) => {
                state.config.position.monitor = PRIMARY_MONITOR;
                (state.goto(Step::OffsetX), Vec::new())
            }
            Input::Choose(i) if i <= state.monitor_count => {
                state.config.position.monitor = i32::try_from(i - 1).unwrap_or(0);
                (state.goto(Step::OffsetX), Vec::new())
            }
            _ => state.reject("choose one of the listed monitors"),
        },

        Step::OffsetX => match value_of(input, 0, OFFSET_LIMITS) {
            Ok(offset) => {
                state.config.position.offset_x = offset;
                (state.goto(Step::OffsetY), Vec::new())
            }
            Err(e) => state.reject(e),
        },

        Step::OffsetY => match value_of(input, 0, OFFSET_LIMITS) {
            Ok(offset) => {
                state.config.position.offset_y = offset;
                (state.goto(Step::Confirm), Vec::new())
            }
            Err(e) => state.reject(e),
        },

        Step::Confirm => match input {
            Input::Choose(0) => {
                let effects = vec![Effect::Save(state.config.clone())];
                state.saved = true;
                (state.goto(Step::StartPrompt), effects)
            }
            Input::Choose(1) => {
                state.config = Config::default();
                (state.goto(Step::Shape), Vec::new())
            }
            Input::Choose(2) => (state.goto(Step::Finished), vec![Effect::Exit { start: false }]),
            _ => state.reject("choose Save, Start over or Cancel"),
        },

        Step::StartPrompt => match input {
            Input::Choose(i @ (0 | 1)) => {
                state.start = i == 0;
                let start = state.start;
                (state.goto(Step::Finished), vec![Effect::Exit { start }])
            }
            _ => state.reject("choose Yes or No"),
        },

        Step::Finished => (state, Vec::new()),
    }
}

fn value_of(input: Input, default: i32, limits: (i32, i32)) -> Result<i32, String> {
    match input {
        Input::Value(text) => parse_bounded(&text, default, limits),
        _ => Err(format!("enter a number between {} and {}", limits.0, limits.1)),
    }
}

/// Classify a raw line of terminal input for the current step.
///
/// Options are numbered from 1 on screen. An empty line picks the first
/// option of a list, or the default of a numeric field.
pub fn parse_line(state: &Wizard, line: &str) -> Input {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "q" | "quit" => return Input::Quit,
        "b" | "back" => return Input::Back,
        _ => {}
    }

    let step = state.step;
    if step.is_selection() || step.is_color() {
        if line.is_empty() && step.is_selection() {
            return Input::Choose(0);
        }
        // colors: small numbers pick a preset, anything else is a hex value
        if let Ok(n) = line.parse::<usize>() {
            if n >= 1 && (step.is_selection() || n <= option_count(state)) {
                return Input::Choose(n - 1);
            }
        }
    }
    Input::Value(line.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Presentation
// ─────────────────────────────────────────────────────────────────────────────

/// What the driver should show for the current step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub options: Vec<String>,
    pub hint: Option<String>,
}

fn number_prompt(title: &str, default: i32, (min, max): (i32, i32)) -> Prompt {
    Prompt {
        title: title.to_string(),
        options: Vec::new(),
        hint: Some(format!("Range: {min} to {max}, default: {default}")),
    }
}

fn color_prompt(title: &str) -> Prompt {
    Prompt {
        title: title.to_string(),
        options: COLOR_PRESETS
            .iter()
            .map(|(name, hex)| format!("{name} {hex}"))
            .collect(),
        hint: Some("or type a hex color like #FF0000".to_string()),
    }
}

/// Summary rows shown on the confirmation step
pub fn summary(config: &Config) -> Vec<(&'static str, String)> {
    let c = &config.crosshair;
    let mut rows = vec![
        ("Shape", c.shape.clone()),
        ("Color", c.color.clone()),
        ("Size", format!("{} px", c.size)),
    ];
    if Shape::from_name(&c.shape).has_arms() {
        rows.push(("Thickness", format!("{} px", c.thickness)));
        rows.push(("Gap", format!("{} px", c.gap)));
    }
    if c.outline_thickness > 0 {
        rows.push((
            "Outline",
            format!("{} px ({})", c.outline_thickness, c.outline_color),
        ));
    }
    let p = &config.position;
    rows.push((
        "Monitor",
        if p.monitor == PRIMARY_MONITOR {
            "Primary (auto)".to_string()
        } else {
            p.monitor.to_string()
        },
    ));
    if p.offset_x != 0 || p.offset_y != 0 {
        rows.push(("Offset", format!("({}, {})", p.offset_x, p.offset_y)));
    }
    rows
}

pub fn prompt(state: &Wizard, monitors: &[Monitor]) -> Prompt {
    match state.step {
        Step::Shape => Prompt {
            title: "Select crosshair shape:".to_string(),
            options: Shape::ALL.iter().map(|s| s.name().to_string()).collect(),
            hint: None,
        },
        Step::Color => color_prompt("Select crosshair color:"),
        Step::Size => number_prompt("Crosshair size (pixels from center):", 10, SIZE_LIMITS),
        Step::Thickness => number_prompt("Line thickness (pixels):", 2, THICKNESS_LIMITS),
        Step::Gap => number_prompt("Center gap (0 for solid, or pixels):", 0, GAP_LIMITS),
        Step::Outline => Prompt {
            title: "Add outline?".to_string(),
            options: vec!["No".to_string(), "Yes".to_string()],
            hint: None,
        },
        Step::OutlineColor => color_prompt("Select outline color:"),
        Step::Monitor => {
            let mut options = vec!["Primary (auto-detect)".to_string()];
            options.extend(monitors.iter().enumerate().map(|(i, m)| {
                let primary = if m.primary { " ← primary" } else { "" };
                format!("[{i}] {}: {}x{}{primary}", m.name, m.width, m.height)
            }));
            Prompt {
                title: "Select monitor:".to_string(),
                options,
                hint: None,
            }
        }
        Step::OffsetX => number_prompt(
            "Horizontal offset from center (pixels, negative=left):",
            0,
            OFFSET_LIMITS,
        ),
        Step::OffsetY => number_prompt(
            "Vertical offset from center (pixels, negative=up):",
            0,
            OFFSET_LIMITS,
        ),
        Step::Confirm => {
            let rows: Vec<String> = summary(&state.config)
                .into_iter()
                .map(|(label, value)| format!("  {:<10} {value}", format!("{label}:")))
                .collect();
            Prompt {
                title: format!("Review your configuration:\n\n{}\n", rows.join("\n")),
                options: vec![
                    "Save configuration".to_string(),
                    "Start over".to_string(),
                    "Cancel".to_string(),
                ],
                hint: None,
            }
        }
        Step::StartPrompt => Prompt {
            title: "✓ Configuration saved! Start the crosshair now?".to_string(),
            options: vec!["Yes, start now".to_string(), "No, exit".to_string()],
            hint: None,
        },
        Step::Finished => Prompt {
            title: String::new(),
            options: Vec::new(),
            hint: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(mut state: Wizard, inputs: Vec<Input>) -> (Wizard, Vec<Effect>) {
        let mut all = Vec::new();
        for input in inputs {
            let (next, effects) = transition(state, input);
            state = next;
            all.extend(effects);
        }
        (state, all)
    }

    fn value(s: &str) -> Input {
        Input::Value(s.to_string())
    }

    #[test]
    fn full_cross_walkthrough_saves_and_starts() {
        let (state, effects) = feed(
            Wizard::new(2),
            vec![
                Input::Choose(0), // cross
                Input::Choose(1), // red
                value("12"),
                value("3"),
                value("4"),
                Input::Choose(1), // outline yes
                value("000000"),
                Input::Choose(2), // monitor index 1
                value("-5"),
                value(""),
                Input::Choose(0), // save
                Input::Choose(0), // start
            ],
        );

        assert!(state.is_finished());
        assert!(state.start);
        let c = &state.config;
        assert_eq!(c.crosshair.shape, "cross");
        assert_eq!(c.crosshair.color, "#FF0000");
        assert_eq!((c.crosshair.size, c.crosshair.thickness, c.crosshair.gap), (12, 3, 4));
        assert_eq!(c.crosshair.outline_thickness, 1);
        assert_eq!(c.crosshair.outline_color, "#000000");
        assert_eq!(c.position.monitor, 1);
        assert_eq!((c.position.offset_x, c.position.offset_y), (-5, 0));

        assert_eq!(effects.len(), 2);
        assert_eq!(effects[0], Effect::Save(state.config.clone()));
        assert_eq!(effects[1], Effect::Exit { start: true });
    }

    #[test]
    fn dot_skips_thickness_and_gap_both_ways() {
        let (state, _) = feed(
            Wizard::new(0),
            vec![Input::Choose(1), Input::Choose(0), value("8")],
        );
        assert_eq!(state.step, Step::Outline);

        let (state, _) = transition(state, Input::Back);
        assert_eq!(state.step, Step::Size);
    }

    #[test]
    fn back_from_monitor_skips_unused_outline_color() {
        let (state, _) = feed(
            Wizard::new(1),
            vec![
                Input::Choose(0),
                Input::Choose(0),
                value(""),
                value(""),
                value(""),
                Input::Choose(0),
            ],
        );
        assert_eq!(state.step, Step::Monitor);
        assert_eq!(transition(state, Input::Back).0.step, Step::Outline);
    }

    #[test]
    fn invalid_value_keeps_step_and_reports() {
        let (state, _) = feed(Wizard::new(0), vec![Input::Choose(0), Input::Choose(0)]);
        let (state, effects) = transition(state, value("101"));
        assert_eq!(state.step, Step::Size);
        assert_eq!(state.error.as_deref(), Some("enter a number between 1 and 100"));
        assert!(effects.is_empty());

        let (state, _) = transition(state, value("abc"));
        assert_eq!(state.step, Step::Size);

        let (state, _) = transition(state, value("50"));
        assert_eq!(state.step, Step::Thickness);
        assert_eq!(state.error, None);
    }

    #[test]
    fn custom_color_needs_valid_hex() {
        let (state, _) = transition(Wizard::new(0), Input::Choose(0));
        let (state, _) = transition(state, value("nothex"));
        assert_eq!(state.step, Step::Color);
        assert_eq!(state.error.as_deref(), Some("invalid color format"));

        let (state, _) = transition(state, value("#00aa00"));
        assert_eq!(state.step, Step::Size);
        assert_eq!(state.config.crosshair.color, "#00aa00");
    }

    #[test]
    fn monitor_choice_out_of_range() {
        let mut state = Wizard::new(1);
        state.step = Step::Monitor;
        let (state, _) = transition(state, Input::Choose(2));
        assert_eq!(state.step, Step::Monitor);
        assert!(state.error.is_some());

        let (state, _) = transition(state, Input::Choose(0));
        assert_eq!(state.config.position.monitor, PRIMARY_MONITOR);
    }

    #[test]
    fn quit_exits_without_start() {
        let (state, effects) = transition(Wizard::new(0), Input::Quit);
        assert!(state.is_finished());
        assert_eq!(effects, vec![Effect::Exit { start: false }]);
    }

    #[test]
    fn start_over_resets_config() {
        let mut state = Wizard::new(0);
        state.step = Step::Confirm;
        state.config.crosshair.size = 77;
        let (state, effects) = transition(state, Input::Choose(1));
        assert_eq!(state.step, Step::Shape);
        assert_eq!(state.config, Config::default());
        assert!(effects.is_empty());
    }

    #[test]
    fn save_failure_returns_to_confirm() {
        let mut state = Wizard::new(0);
        state.step = Step::Confirm;
        let (state, effects) = transition(state, Input::Choose(0));
        assert!(state.saved);
        assert!(matches!(effects[0], Effect::Save(_)));

        let (state, _) = transition(state, Input::SaveFailed("disk full".into()));
        assert_eq!(state.step, Step::Confirm);
        assert!(!state.saved);
        assert_eq!(state.error.as_deref(), Some("disk full"));
    }

    #[test]
    fn parse_line_by_step() {
        let mut state = Wizard::new(2);
        assert_eq!(parse_line(&state, "2"), Input::Choose(1));
        assert_eq!(parse_line(&state, ""), Input::Choose(0));
        assert_eq!(parse_line(&state, " Q "), Input::Quit);
        assert_eq!(parse_line(&state, "back"), Input::Back);

        state.step = Step::Color;
        assert_eq!(parse_line(&state, "3"), Input::Choose(2));
        assert_eq!(parse_line(&state, "123456"), value("123456"));
        assert_eq!(parse_line(&state, "#ff0000"), value("#ff0000"));

        state.step = Step::OffsetX;
        assert_eq!(parse_line(&state, "-20"), value("-20"));
        assert_eq!(parse_line(&state, "3"), value("3"));
    }

    #[test]
    fn summary_hides_unused_fields() {
        let mut config = Config::default();
        config.crosshair.shape = "circle".into();
        let labels: Vec<_> = summary(&config).into_iter().map(|(l, _)| l).collect();
        assert_eq!(labels, ["Shape", "Color", "Size", "Monitor"]);

        config.crosshair.shape = "cross".into();
        config.crosshair.outline_thickness = 1;
        config.position.monitor = -1;
        config.position.offset_y = 3;
        let rows = summary(&config);
        assert!(rows.contains(&("Outline", "1 px (#000000)".to_string())));
        assert!(rows.contains(&("Monitor", "Primary (auto)".to_string())));
        assert!(rows.contains(&("Offset", "(0, 3)".to_string())));
    }

    #[test]
    fn monitor_prompt_lists_primary_first() {
        let monitors = vec![Monitor::screen(2560, 1440)];
        let mut state = Wizard::new(1);
        state.step = Step::Monitor;
        let p = prompt(&state, &monitors);
        assert_eq!(p.options[0], "Primary (auto-detect)");
        assert_eq!(p.options[1], "[0] default: 2560x1440 ← primary");
    }
}
