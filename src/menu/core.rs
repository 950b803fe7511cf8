use std::fmt;

use crate::geometry::Size;
use crate::keymap::{KeyAction, KeyMap};
use crate::list::{DEFAULT_LIST_HEIGHT, DEFAULT_LIST_WIDTH, ListItem, SelectList};
use crate::screen::{Effect, Screen, ScreenEvent, ScreenFactory, factory_from};
use crate::stack::NavigationItem;

/// Stable key for a [`Choice`], used to restore the cursor when a menu is
/// rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChoiceId(String);

impl ChoiceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ChoiceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One menu entry and the screen it leads to.
#[derive(Clone)]
pub struct Choice {
    id: ChoiceId,
    title: String,
    description: String,
    factory: ScreenFactory,
}

impl Choice {
    /// Every confirmation pushes a fresh clone of `screen`. The id defaults to
    /// the title.
    pub fn new<S>(title: impl Into<String>, description: impl Into<String>, screen: S) -> Self
    where
        S: Screen + Clone + Sync + 'static,
    {
        Self::with_factory(title, description, factory_from(screen))
    }

    pub fn with_factory(
        title: impl Into<String>,
        description: impl Into<String>,
        factory: ScreenFactory,
    ) -> Self {
        let title = title.into();
        Self {
            id: ChoiceId::new(title.clone()),
            title,
            description: description.into(),
            factory,
        }
    }

    pub fn with_id(mut self, id: impl Into<ChoiceId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn id(&self) -> &ChoiceId {
        &self.id
    }

    pub fn factory(&self) -> &ScreenFactory {
        &self.factory
    }

    pub fn instantiate(&self) -> Box<dyn Screen> {
        (self.factory)()
    }
}

impl ListItem for Choice {
    fn title(&self) -> &str {
        &self.title
    }

    fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Choice")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

/// Selectable list of [`Choice`]s. Enter pushes the highlighted choice's
/// screen, Esc pops back.
#[derive(Debug, Clone)]
pub struct MenuScreen {
    list: SelectList<Choice>,
    keymap: KeyMap,
    last_confirmed: Option<ChoiceId>,
}

impl MenuScreen {
    /// When `preselected` names one of `choices` the cursor starts there;
    /// otherwise it starts on the first choice.
    pub fn new(title: impl Into<String>, choices: Vec<Choice>, preselected: Option<&ChoiceId>) -> Self {
        let selected_index =
            preselected.and_then(|id| choices.iter().position(|choice| choice.id() == id));

        let mut list = SelectList::new(choices, DEFAULT_LIST_WIDTH, DEFAULT_LIST_HEIGHT);
        list.set_title(title);
        list.set_show_title(true);
        list.set_show_pagination(true);
        list.set_filtering_enabled(false);
        if let Some(index) = selected_index {
            list.select(index);
        }

        Self {
            list,
            keymap: KeyMap::default(),
            last_confirmed: None,
        }
    }

    pub fn with_keymap(mut self, keymap: KeyMap) -> Self {
        self.keymap = keymap;
        self
    }

    pub fn title(&self) -> &str {
        self.list.title()
    }

    pub fn choices(&self) -> &[Choice] {
        self.list.items()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.list.index()
    }

    pub fn selected_choice(&self) -> Option<&Choice> {
        self.list.selected_item()
    }

    /// Choice most recently turned into a push request. Display state only.
    pub fn last_confirmed(&self) -> Option<&ChoiceId> {
        self.last_confirmed.as_ref()
    }

    pub fn size(&self) -> Size {
        self.list.size()
    }

    fn confirm(&mut self) -> Option<Effect> {
        let choice = self.list.selected_item()?;
        let item = NavigationItem::from_boxed(choice.title.clone(), choice.instantiate());
        self.last_confirmed = Some(choice.id.clone());
        Some(Effect::Push(item))
    }
}

impl Screen for MenuScreen {
    fn name(&self) -> &str {
        "menu"
    }

    fn handle(&mut self, event: &ScreenEvent) -> Option<Effect> {
        match event {
            ScreenEvent::Resize(size) => {
                self.resize(*size);
                None
            }
            ScreenEvent::Key(key) => match self.keymap.action(key)? {
                KeyAction::Cancel => Some(Effect::Pop),
                KeyAction::Confirm => self.confirm(),
                action => {
                    self.list.handle_action(action);
                    None
                }
            },
            _ => None,
        }
    }

    fn render(&self) -> String {
        if self.list.is_empty() {
            return String::new();
        }
        format!("\n{}", self.list.render())
    }

    fn resize(&mut self, size: Size) {
        self.list.set_size(size);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::ColorScreen;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn key(code: KeyCode) -> ScreenEvent {
        ScreenEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn palette() -> Vec<Choice> {
        vec![
            Choice::new("Red", "Raindrops on roses", ColorScreen::new("#FF0000", "love")),
            Choice::new("Green", "Grass", ColorScreen::new("#00FF00", "luck")),
            Choice::new("Blue", "Shoes", ColorScreen::new("#0000FF", "youth")),
        ]
    }

    fn pushed(effect: Option<Effect>) -> NavigationItem {
        match effect {
            Some(Effect::Push(item)) => item,
            other => panic!("expected a push, got {other:?}"),
        }
    }

    #[test]
    fn confirm_pushes_highlighted_choice() {
        for index in 0..3 {
            let mut menu = MenuScreen::new("Colors", palette(), None);
            for _ in 0..index {
                assert!(menu.handle(&key(KeyCode::Down)).is_none());
            }
            let item = pushed(menu.handle(&key(KeyCode::Enter)));
            let choices = palette();
            let expected = &choices[index];
            assert_eq!(item.title(), expected.title());
            assert_eq!(item.screen().render(), expected.instantiate().render());
            assert_eq!(menu.selected_index(), Some(index));
            assert_eq!(menu.last_confirmed(), Some(expected.id()));
        }
    }

    #[test]
    fn confirm_builds_child_from_choice_factory() {
        let built = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&built);
        let factory: ScreenFactory = Arc::new(move || -> Box<dyn Screen> {
            counter.fetch_add(1, Ordering::SeqCst);
            Box::new(ColorScreen::new("#123456", "probe"))
        });
        let mut menu = MenuScreen::new(
            "Factory",
            vec![Choice::with_factory("Probe", "counts builds", factory)],
            None,
        );

        let first = pushed(menu.handle(&key(KeyCode::Enter)));
        let second = pushed(menu.handle(&key(KeyCode::Enter)));
        assert_eq!(built.load(Ordering::SeqCst), 2);
        assert_eq!(first.screen().name(), "color");
        assert_eq!(second.title(), "Probe");
    }

    #[test]
    fn cancel_pops_without_moving_cursor() {
        let mut menu = MenuScreen::new("Colors", palette(), None);
        menu.handle(&key(KeyCode::Down));
        let before = menu.render();
        assert!(matches!(menu.handle(&key(KeyCode::Esc)), Some(Effect::Pop)));
        assert_eq!(menu.selected_index(), Some(1));
        assert_eq!(menu.render(), before);
        assert!(menu.last_confirmed().is_none());
    }

    #[test]
    fn confirm_without_choices_is_a_no_op() {
        let mut menu = MenuScreen::new("Empty", Vec::new(), None);
        assert!(menu.handle(&key(KeyCode::Enter)).is_none());
        assert_eq!(menu.render(), "");
        assert!(matches!(menu.handle(&key(KeyCode::Esc)), Some(Effect::Pop)));
    }

    #[test]
    fn preselection_matches_by_id() {
        let green = ChoiceId::from("Green");
        let menu = MenuScreen::new("Colors", palette(), Some(&green));
        assert_eq!(menu.selected_choice().map(|c| c.id()), Some(&green));

        let renamed = palette()
            .into_iter()
            .map(|choice| {
                let id = format!("color-{}", choice.title().to_lowercase());
                choice.with_id(ChoiceId::new(id))
            })
            .collect();
        let blue = ChoiceId::new("color-blue");
        let menu = MenuScreen::new("Colors", renamed, Some(&blue));
        assert_eq!(menu.selected_index(), Some(2));

        let missing = ChoiceId::from("Purple");
        let menu = MenuScreen::new("Colors", palette(), Some(&missing));
        assert_eq!(menu.selected_index(), Some(0));
    }

    #[test]
    fn resize_and_navigation_produce_no_effects() {
        let mut menu = MenuScreen::new("Colors", palette(), None);
        assert_eq!(menu.size(), Size::new(DEFAULT_LIST_WIDTH, DEFAULT_LIST_HEIGHT));
        assert!(menu.handle(&ScreenEvent::Resize(Size::new(50, 10))).is_none());
        assert_eq!(menu.size(), Size::new(50, 10));

        assert!(menu.handle(&key(KeyCode::End)).is_none());
        assert_eq!(menu.selected_index(), Some(2));
        assert!(menu.handle(&key(KeyCode::Char('x'))).is_none());
        assert!(menu.handle(&ScreenEvent::Paste("Red".into())).is_none());
        assert_eq!(menu.selected_index(), Some(2));
    }

    #[test]
    fn render_leads_with_blank_line_and_title() {
        let menu = MenuScreen::new("Colorful Choices", palette(), None);
        let view = menu.render();
        assert!(view.starts_with('\n'));
        assert!(view.contains("Colorful Choices"));
        assert!(view.contains("Green"));
    }

    #[test]
    fn custom_keymap_changes_bindings() {
        let mut keymap = KeyMap::default();
        keymap.bind(KeyAction::Confirm, [KeyCode::Char(' ')]);
        let mut menu = MenuScreen::new("Colors", palette(), None).with_keymap(keymap);
        assert!(menu.handle(&key(KeyCode::Enter)).is_none());
        assert_eq!(pushed(menu.handle(&key(KeyCode::Char(' ')))).title(), "Red");
    }

    #[test]
    fn menus_nest_through_factories() {
        let inner = MenuScreen::new("Shades", palette(), None);
        let outer_choices = vec![Choice::new("Shades", "nested menu", inner)];
        let mut outer = MenuScreen::new("Root", outer_choices, None);
        let item = pushed(outer.handle(&key(KeyCode::Enter)));
        assert_eq!(item.screen().name(), "menu");
        assert!(item.screen().render().contains("Shades"));
    }
}
