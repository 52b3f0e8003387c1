//! Application state and core TUI types.

use postwright_core::{GeneratedPost, PostRecord};

/// Application mode determines which view is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AppMode {
    /// List view - one row per platform
    List,
    /// Detail view - full post for the selected platform
    Detail,
    /// Edit view - content and hashtag buffers
    Edit,
    /// Reject view - reason buffer
    Reject,
    /// History view - recently saved posts
    History,
}

/// Edit field focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EditField {
    /// Post content
    Content,
    /// Space or comma separated hashtags
    Hashtags,
}

/// Edit buffer for inline editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditBuffer {
    /// Content being edited
    pub content: String,
    /// Hashtags being edited
    pub hashtags: String,
    /// Which field is currently focused
    pub focused_field: EditField,
}

impl EditBuffer {
    /// Buffer seeded from a post.
    pub fn from_post(post: &GeneratedPost) -> Self {
        Self {
            content: post.content().clone(),
            hashtags: post
                .hashtags()
                .iter()
                .map(|tag| format!("#{}", tag))
                .collect::<Vec<_>>()
                .join(" "),
            focused_field: EditField::Content,
        }
    }

    fn focused_mut(&mut self) -> &mut String {
        match self.focused_field {
            EditField::Content => &mut self.content,
            EditField::Hashtags => &mut self.hashtags,
        }
    }
}

/// Main application state.
pub struct App {
    /// Current mode
    pub mode: AppMode,
    /// Topic under review
    pub topic: String,
    /// Platforms in the run, in display order
    pub platforms: Vec<String>,
    /// Currently selected index in list
    pub selected_index: usize,
    /// Edit buffer (when in Edit mode)
    pub edit_buffer: Option<EditBuffer>,
    /// Rejection reason (when in Reject mode)
    pub reject_reason: String,
    /// Saved posts shown in History mode
    pub history: Vec<PostRecord>,
    /// Status message to display
    pub status_message: String,
    /// Whether to quit the application
    pub should_quit: bool,
}

impl App {
    /// Create a new App over the given platforms.
    pub fn new(topic: impl Into<String>, platforms: Vec<String>) -> Self {
        Self {
            mode: AppMode::List,
            topic: topic.into(),
            platforms,
            selected_index: 0,
            edit_buffer: None,
            reject_reason: String::new(),
            history: Vec::new(),
            status_message: String::from("Review each post, then approve or reject"),
            should_quit: false,
        }
    }

    /// Platform under the cursor.
    pub fn selected_platform(&self) -> Option<&str> {
        self.platforms.get(self.selected_index).map(String::as_str)
    }

    /// Move selection up.
    pub fn select_previous(&mut self) {
        if !self.platforms.is_empty() && self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Move selection down.
    pub fn select_next(&mut self) {
        if self.selected_index < self.platforms.len().saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    /// Enter detail view for selected platform.
    pub fn enter_detail(&mut self) {
        if !self.platforms.is_empty() {
            self.mode = AppMode::Detail;
        }
    }

    /// Return to list view, discarding any buffers.
    pub fn return_to_list(&mut self) {
        self.mode = AppMode::List;
        self.edit_buffer = None;
        self.reject_reason.clear();
    }

    /// Enter edit mode seeded from the selected post.
    pub fn enter_edit(&mut self, post: &GeneratedPost) {
        self.edit_buffer = Some(EditBuffer::from_post(post));
        self.mode = AppMode::Edit;
    }

    /// Enter reject mode with an empty reason.
    pub fn enter_reject(&mut self) {
        self.reject_reason.clear();
        self.mode = AppMode::Reject;
    }

    /// Enter history mode with the given records.
    pub fn enter_history(&mut self, records: Vec<PostRecord>) {
        self.history = records;
        self.mode = AppMode::History;
    }

    /// Switch focus between the content and hashtag fields.
    pub fn toggle_edit_field(&mut self) {
        if let Some(buffer) = &mut self.edit_buffer {
            buffer.focused_field = match buffer.focused_field {
                EditField::Content => EditField::Hashtags,
                EditField::Hashtags => EditField::Content,
            };
        }
    }

    /// Type a character into the active buffer.
    pub fn push_char(&mut self, c: char) {
        match self.mode {
            AppMode::Edit => {
                if let Some(buffer) = &mut self.edit_buffer {
                    buffer.focused_mut().push(c);
                }
            }
            AppMode::Reject => self.reject_reason.push(c),
            _ => {}
        }
    }

    /// Delete the last character of the active buffer.
    pub fn pop_char(&mut self) {
        match self.mode {
            AppMode::Edit => {
                if let Some(buffer) = &mut self.edit_buffer {
                    buffer.focused_mut().pop();
                }
            }
            AppMode::Reject => {
                self.reject_reason.pop();
            }
            _ => {}
        }
    }

    /// Take the edit buffer for saving.
    pub fn take_edit(&mut self) -> Option<EditBuffer> {
        self.edit_buffer.take()
    }

    /// Quit the application.
    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        App::new(
            "Launch",
            vec!["facebook".to_string(), "linkedin".to_string(), "twitter".to_string()],
        )
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut app = app();
        app.select_previous();
        assert_eq!(app.selected_platform(), Some("facebook"));
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected_platform(), Some("twitter"));
    }

    #[test]
    fn test_empty_app_has_no_selection() {
        let mut app = App::new("Launch", Vec::new());
        app.select_next();
        app.enter_detail();
        assert_eq!(app.selected_platform(), None);
        assert_eq!(app.mode, AppMode::List);
    }

    #[test]
    fn test_typing_goes_to_focused_field() {
        let mut app = app();
        app.edit_buffer = Some(EditBuffer {
            content: "Hi".to_string(),
            hashtags: String::new(),
            focused_field: EditField::Content,
        });
        app.mode = AppMode::Edit;

        app.push_char('!');
        app.toggle_edit_field();
        app.push_char('#');
        app.push_char('A');
        app.pop_char();
        app.push_char('B');

        let buffer = app.take_edit().unwrap();
        assert_eq!(buffer.content, "Hi!");
        assert_eq!(buffer.hashtags, "#B");
    }

    #[test]
    fn test_reject_reason_buffer_cleared_on_return() {
        let mut app = app();
        app.enter_reject();
        for c in "Off brand".chars() {
            app.push_char(c);
        }
        assert_eq!(app.reject_reason, "Off brand");
        app.return_to_list();
        assert!(app.reject_reason.is_empty());
        assert_eq!(app.mode, AppMode::List);
    }
}
