//! Keybinding registry — maps key events to typed actions with config
//! overrides.
//!
//! Every user-facing operation is a variant of `Action`; the presentation
//! layer resolves key presses through the registry instead of hardcoding
//! key match arms. This is also the replacement for the original web UI's
//! globally exposed functions: a typed registry of named actions, decoupled
//! from any specific binding mechanism.
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

// ============================================================================
// Action Enum
// ============================================================================

/// All user-facing actions that can be triggered by keybindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Quit,
    NavDown,
    NavUp,
    Back,
    ToggleSection,
    EnterSearch,
    ClearFilter,
    OpenAddItem,
    OpenFilterPanel,
    OpenNewIngredient,
    DeleteItem,
    Refresh,
    SortByName,
    SortByCategory,
    SortBySubcategory,
    CycleTheme,
    ShowHelp,
}

impl Action {
    /// Human-readable description for the help screen.
    pub fn describe(self) -> &'static str {
        match self {
            Self::Quit => "Quit application",
            Self::NavDown => "Navigate down",
            Self::NavUp => "Navigate up",
            Self::Back => "Dismiss / clear search",
            Self::ToggleSection => "Collapse/expand category section",
            Self::EnterSearch => "Enter search mode",
            Self::ClearFilter => "Clear search and filter",
            Self::OpenAddItem => "Add an item to the bar",
            Self::OpenFilterPanel => "Open the filter panel",
            Self::OpenNewIngredient => "Create a new master ingredient",
            Self::DeleteItem => "Delete the selected item",
            Self::Refresh => "Reload inventory from the server",
            Self::SortByName => "Sort by name",
            Self::SortByCategory => "Sort by category",
            Self::SortBySubcategory => "Sort by subcategory",
            Self::CycleTheme => "Cycle theme",
            Self::ShowHelp => "Show help",
        }
    }

    /// Config-file name of this action for keybinding overrides.
    fn config_name(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::NavDown => "nav_down",
            Self::NavUp => "nav_up",
            Self::Back => "back",
            Self::ToggleSection => "toggle_section",
            Self::EnterSearch => "search",
            Self::ClearFilter => "clear_filter",
            Self::OpenAddItem => "add_item",
            Self::OpenFilterPanel => "filter_panel",
            Self::OpenNewIngredient => "new_ingredient",
            Self::DeleteItem => "delete_item",
            Self::Refresh => "refresh",
            Self::SortByName => "sort_name",
            Self::SortByCategory => "sort_category",
            Self::SortBySubcategory => "sort_subcategory",
            Self::CycleTheme => "cycle_theme",
            Self::ShowHelp => "help",
        }
    }

    fn all() -> &'static [Action] {
        &[
            Self::Quit,
            Self::NavDown,
            Self::NavUp,
            Self::Back,
            Self::ToggleSection,
            Self::EnterSearch,
            Self::ClearFilter,
            Self::OpenAddItem,
            Self::OpenFilterPanel,
            Self::OpenNewIngredient,
            Self::DeleteItem,
            Self::Refresh,
            Self::SortByName,
            Self::SortByCategory,
            Self::SortBySubcategory,
            Self::CycleTheme,
            Self::ShowHelp,
        ]
    }
}

// ============================================================================
// Context Enum
// ============================================================================

/// Dispatch context — determines which bindings are active.
///
/// Dialogs capture their keys directly (text entry), so only the browse
/// surface goes through the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Context {
    Global,
    Inventory,
}

// ============================================================================
// Key Specification
// ============================================================================

/// A key event: code + modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySpec {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeySpec {
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }
}

/// Parse a key string from config into a KeySpec.
///
/// Supported formats:
/// - Single char: "q", "j", "/"
/// - Named keys: "Enter", "Esc", "Tab", "Up", "Down", "Backspace", "Space"
/// - Modifier combos: "Ctrl+d"
/// - Function keys: "F1" through "F12"
fn parse_key_string(s: &str) -> Option<KeySpec> {
    let s = s.trim();

    if let Some(rest) = s.strip_prefix("Ctrl+") {
        let rest = rest.trim();
        if rest.chars().count() == 1 {
            return Some(KeySpec::ctrl(rest.chars().next()?));
        }
        return None;
    }

    match s.to_lowercase().as_str() {
        "enter" | "return" => return Some(KeySpec::plain(KeyCode::Enter)),
        "esc" | "escape" => return Some(KeySpec::plain(KeyCode::Esc)),
        "tab" => return Some(KeySpec::plain(KeyCode::Tab)),
        "up" => return Some(KeySpec::plain(KeyCode::Up)),
        "down" => return Some(KeySpec::plain(KeyCode::Down)),
        "left" => return Some(KeySpec::plain(KeyCode::Left)),
        "right" => return Some(KeySpec::plain(KeyCode::Right)),
        "backspace" => return Some(KeySpec::plain(KeyCode::Backspace)),
        "space" => return Some(KeySpec::plain(KeyCode::Char(' '))),
        "delete" => return Some(KeySpec::plain(KeyCode::Delete)),
        _ => {}
    }

    if let Some(rest) = s.strip_prefix('F').or_else(|| s.strip_prefix('f')) {
        if let Ok(n) = rest.parse::<u8>() {
            if (1..=12).contains(&n) {
                return Some(KeySpec::plain(KeyCode::F(n)));
            }
        }
    }

    if s.chars().count() == 1 {
        return Some(KeySpec::plain(KeyCode::Char(s.chars().next()?)));
    }

    None
}

/// Format a KeySpec as a human-readable string for the help screen.
fn format_key(key: &KeySpec) -> String {
    let modifier = if key.modifiers.contains(KeyModifiers::CONTROL) {
        "Ctrl+"
    } else {
        ""
    };

    let key_name = match key.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::F(n) => format!("F{}", n),
        _ => "?".to_string(),
    };

    format!("{}{}", modifier, key_name)
}

/// Parse a KeySpec plain char from a char helper for defaults.
const fn ch(c: char) -> KeySpec {
    KeySpec::plain(KeyCode::Char(c))
}

// ============================================================================
// Keybinding Registry
// ============================================================================

/// Registry of keybindings, supporting default bindings and config
/// overrides. Lookup is O(1) via HashMap; the same key can map to different
/// actions in different contexts, and the `Inventory` context falls back to
/// `Global`.
pub struct KeybindingRegistry {
    lookup: HashMap<(Context, KeySpec), Action>,
    /// All bindings for help screen enumeration, in registration order.
    bindings: Vec<(Context, KeySpec, Action)>,
}

impl Default for KeybindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingRegistry {
    /// Create a registry with the default bindings.
    pub fn new() -> Self {
        let mut registry = Self {
            lookup: HashMap::new(),
            bindings: Vec::new(),
        };
        registry.register_defaults();
        registry
    }

    fn bind(&mut self, context: Context, key: KeySpec, action: Action) {
        self.lookup.insert((context, key), action);
        self.bindings.push((context, key, action));
    }

    fn register_defaults(&mut self) {
        self.bind(Context::Global, ch('q'), Action::Quit);
        self.bind(Context::Global, KeySpec::plain(KeyCode::Esc), Action::Back);
        self.bind(Context::Global, ch('?'), Action::ShowHelp);
        self.bind(Context::Global, ch('t'), Action::CycleTheme);
        self.bind(Context::Global, ch('r'), Action::Refresh);

        self.bind(Context::Inventory, ch('j'), Action::NavDown);
        self.bind(
            Context::Inventory,
            KeySpec::plain(KeyCode::Down),
            Action::NavDown,
        );
        self.bind(Context::Inventory, ch('k'), Action::NavUp);
        self.bind(
            Context::Inventory,
            KeySpec::plain(KeyCode::Up),
            Action::NavUp,
        );
        self.bind(
            Context::Inventory,
            KeySpec::plain(KeyCode::Enter),
            Action::ToggleSection,
        );
        self.bind(Context::Inventory, ch('/'), Action::EnterSearch);
        self.bind(Context::Inventory, ch('c'), Action::ClearFilter);
        self.bind(Context::Inventory, ch('a'), Action::OpenAddItem);
        self.bind(Context::Inventory, ch('f'), Action::OpenFilterPanel);
        self.bind(Context::Inventory, ch('n'), Action::OpenNewIngredient);
        self.bind(Context::Inventory, ch('d'), Action::DeleteItem);
        self.bind(
            Context::Inventory,
            KeySpec::plain(KeyCode::Delete),
            Action::DeleteItem,
        );
        self.bind(Context::Inventory, ch('1'), Action::SortByName);
        self.bind(Context::Inventory, ch('2'), Action::SortByCategory);
        self.bind(Context::Inventory, ch('3'), Action::SortBySubcategory);
    }

    /// Resolve a key press in a context, falling back to `Global`.
    pub fn action_for_key(
        &self,
        code: KeyCode,
        modifiers: KeyModifiers,
        context: Context,
    ) -> Option<Action> {
        let key = KeySpec::new(code, modifiers);
        self.lookup
            .get(&(context, key))
            .or_else(|| self.lookup.get(&(Context::Global, key)))
            .copied()
    }

    /// Apply keybinding overrides from the config file.
    ///
    /// Each entry maps an action name to a key string. The override
    /// replaces ALL default bindings for that action within its contexts.
    /// Unknown action names and unparseable key strings are logged and
    /// skipped.
    pub fn apply_overrides(&mut self, overrides: &HashMap<String, String>) {
        for (action_name, key_string) in overrides {
            let Some(action) = Action::all()
                .iter()
                .copied()
                .find(|a| a.config_name() == action_name)
            else {
                tracing::warn!(action = %action_name, "Unknown action in keybinding overrides");
                continue;
            };
            let Some(key) = parse_key_string(key_string) else {
                tracing::warn!(
                    action = %action_name,
                    key = %key_string,
                    "Unparseable key string in keybinding overrides"
                );
                continue;
            };

            // Contexts this action was bound in by default
            let contexts: Vec<Context> = self
                .bindings
                .iter()
                .filter(|(_, _, a)| *a == action)
                .map(|(c, _, _)| *c)
                .collect();

            self.lookup.retain(|_, a| *a != action);
            self.bindings.retain(|(_, _, a)| *a != action);

            for context in contexts {
                self.bind(context, key, action);
            }
        }
    }

    /// Enumerate all bindings for the help screen:
    /// (context, formatted key, action, description).
    pub fn all_bindings(&self) -> Vec<(Context, String, Action, &'static str)> {
        self.bindings
            .iter()
            .map(|(ctx, key, action)| (*ctx, format_key(key), *action, action.describe()))
            .collect()
    }
}
