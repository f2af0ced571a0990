//! Input handling for the TUI application.
//!
//! Keys mean different things on different screens, so mapping takes the
//! current [`InputContext`]. Unrecognised keys map to `None` and are ignored.

use bubbletea_rs::event::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

use super::components::FormFocus;
use super::messages::AppMsg;
use crate::pages::ProfilePanel;

/// What the focused part of the screen expects from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputContext {
    /// A movie list: home sections or search results.
    Browse,
    /// The detail screen without an open form.
    Detail,
    /// The detail screen's review form.
    DetailForm(FormFocus),
    /// The profile screen.
    Profile,
    /// A focused text field: search, sign-in or avatar path.
    TextEntry,
    /// The delete confirmation modal.
    Confirm,
}

/// Maps a key event to an application message for `context`.
///
/// Ctrl+C quits from every context.
#[must_use]
pub fn map_key_to_message_with_context(key: &KeyMsg, context: InputContext) -> Option<AppMsg> {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.key == KeyCode::Char('c') {
        return Some(AppMsg::Quit);
    }
    match context {
        InputContext::Browse => map_browse_key(key.key),
        InputContext::Detail => map_detail_key(key.key),
        InputContext::DetailForm(FormFocus::Rating) => map_rating_key(key.key),
        InputContext::DetailForm(FormFocus::Content) => map_content_key(key.key),
        InputContext::Profile => map_profile_key(key.key),
        InputContext::TextEntry => map_text_key(key.key),
        InputContext::Confirm => map_confirm_key(key.key),
    }
}

/// Keys shared by every screen that is not capturing text.
fn map_global_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char('q') => Some(AppMsg::Quit),
        KeyCode::Char('?') => Some(AppMsg::ToggleHelp),
        KeyCode::Char('/') => Some(AppMsg::OpenSearch),
        KeyCode::Char('p') => Some(AppMsg::OpenMyProfile),
        KeyCode::Char('i') => Some(AppMsg::OpenLogin),
        KeyCode::Char('o') => Some(AppMsg::Logout),
        KeyCode::Char('r') => Some(AppMsg::Reload),
        KeyCode::Char('c') => Some(AppMsg::DismissNotice),
        KeyCode::Esc | KeyCode::Backspace => Some(AppMsg::Back),
        _ => None,
    }
}

fn map_browse_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::CursorUp),
        KeyCode::Enter => Some(AppMsg::Select),
        KeyCode::Tab => Some(AppMsg::NextSection),
        other => map_global_key(other),
    }
}

fn map_detail_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char('e') => Some(AppMsg::BeginEdit),
        KeyCode::Char('d') => Some(AppMsg::RequestDelete),
        other => map_global_key(other),
    }
}

fn map_rating_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Left | KeyCode::Char('h') => Some(AppMsg::StarLeft),
        KeyCode::Right | KeyCode::Char('l') => Some(AppMsg::StarRight),
        KeyCode::Char(digit @ '1'..='5') => digit
            .to_digit(10)
            .and_then(|value| u8::try_from(value).ok())
            .map(AppMsg::StarSelect),
        KeyCode::Enter => Some(AppMsg::StarCommit),
        KeyCode::Tab => Some(AppMsg::FocusNext),
        KeyCode::Char('s') => Some(AppMsg::SubmitReview),
        other => map_global_key(other),
    }
}

fn map_content_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Tab => Some(AppMsg::FocusNext),
        KeyCode::Enter => Some(AppMsg::SubmitReview),
        KeyCode::Esc => Some(AppMsg::Back),
        other => map_text_key(other),
    }
}

fn map_profile_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char('1') => Some(AppMsg::TogglePanel(ProfilePanel::Followers)),
        KeyCode::Char('2') => Some(AppMsg::TogglePanel(ProfilePanel::Following)),
        KeyCode::Char('3') => Some(AppMsg::TogglePanel(ProfilePanel::Ratings)),
        KeyCode::Char('4') => Some(AppMsg::TogglePanel(ProfilePanel::Calendar)),
        KeyCode::Char('f') => Some(AppMsg::FollowToggle),
        KeyCode::Char('a') => Some(AppMsg::BeginAvatar),
        KeyCode::Char('u') => Some(AppMsg::UploadAvatar),
        KeyCode::Char('x') => Some(AppMsg::ClearAvatar),
        KeyCode::Char('j') | KeyCode::Down => Some(AppMsg::CursorDown),
        KeyCode::Char('k') | KeyCode::Up => Some(AppMsg::CursorUp),
        KeyCode::Enter => Some(AppMsg::Select),
        KeyCode::Left | KeyCode::Char('h') => Some(AppMsg::PreviousDay),
        KeyCode::Right | KeyCode::Char('l') => Some(AppMsg::NextDay),
        KeyCode::Char('[') => Some(AppMsg::PreviousMonth),
        KeyCode::Char(']') => Some(AppMsg::NextMonth),
        other => map_global_key(other),
    }
}

fn map_text_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char(character) => Some(AppMsg::InputChar(character)),
        KeyCode::Backspace => Some(AppMsg::InputBackspace),
        KeyCode::Enter => Some(AppMsg::InputSubmit),
        KeyCode::Tab => Some(AppMsg::InputNextField),
        KeyCode::Esc => Some(AppMsg::InputCancel),
        _ => None,
    }
}

fn map_confirm_key(code: KeyCode) -> Option<AppMsg> {
    match code {
        KeyCode::Char('y' | 'Y') => Some(AppMsg::ConfirmDelete(true)),
        KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(AppMsg::ConfirmDelete(false)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use bubbletea_rs::event::KeyMsg;
    use crossterm::event::{KeyCode, KeyModifiers};
    use rstest::rstest;

    use super::{InputContext, map_key_to_message_with_context};
    use crate::tui::components::FormFocus;
    use crate::tui::messages::AppMsg;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn mapped(code: KeyCode, context: InputContext) -> Option<AppMsg> {
        map_key_to_message_with_context(&key(code), context)
    }

    #[rstest]
    #[case::browse_down(KeyCode::Char('j'), InputContext::Browse, "CursorDown")]
    #[case::browse_tab(KeyCode::Tab, InputContext::Browse, "NextSection")]
    #[case::detail_edit(KeyCode::Char('e'), InputContext::Detail, "BeginEdit")]
    #[case::rating_right(KeyCode::Right, InputContext::DetailForm(FormFocus::Rating), "StarRight")]
    #[case::rating_commit(KeyCode::Enter, InputContext::DetailForm(FormFocus::Rating), "StarCommit")]
    #[case::content_enter(KeyCode::Enter, InputContext::DetailForm(FormFocus::Content), "SubmitReview")]
    #[case::profile_follow(KeyCode::Char('f'), InputContext::Profile, "FollowToggle")]
    #[case::confirm_yes(KeyCode::Char('y'), InputContext::Confirm, "ConfirmDelete(true)")]
    #[case::confirm_escape(KeyCode::Esc, InputContext::Confirm, "ConfirmDelete(false)")]
    fn keys_map_per_context(
        #[case] code: KeyCode,
        #[case] context: InputContext,
        #[case] expected: &str,
    ) {
        let msg = mapped(code, context).expect("key should map");
        assert_eq!(format!("{msg:?}"), expected);
    }

    #[test]
    fn digits_select_whole_stars() {
        let msg = mapped(KeyCode::Char('4'), InputContext::DetailForm(FormFocus::Rating));
        assert!(matches!(msg, Some(AppMsg::StarSelect(4))));
    }

    #[test]
    fn text_entry_captures_command_letters() {
        let msg = mapped(KeyCode::Char('q'), InputContext::TextEntry);
        assert!(matches!(msg, Some(AppMsg::InputChar('q'))));
        let typed = mapped(KeyCode::Char('q'), InputContext::DetailForm(FormFocus::Content));
        assert!(matches!(typed, Some(AppMsg::InputChar('q'))));
    }

    #[test]
    fn confirm_ignores_other_keys() {
        assert!(mapped(KeyCode::Char('q'), InputContext::Confirm).is_none());
    }

    #[test]
    fn ctrl_c_quits_while_typing() {
        let msg = map_key_to_message_with_context(
            &KeyMsg {
                key: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
            },
            InputContext::TextEntry,
        );
        assert!(matches!(msg, Some(AppMsg::Quit)));
    }
}
