//! IPC request handling.

use harbor_common::events::Event;
use harbor_common::{ProfileId, ViewId, WindowId};
use harbor_config::config_to_value;
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use super::core::Shell;
use crate::dialog::DialogKind;
use crate::ipc::{channels, IpcError, IpcMessage, IpcReply, IpcRequest, IpcSender};
use crate::menu::tab_menu;
use crate::view::View;

impl Shell {
    /// Handle a raw JSON message posted by a page.
    pub fn handle_ipc(&mut self, sender: IpcSender, raw: &str) {
        match IpcMessage::from_json(raw) {
            Ok(message) => {
                let _ = self.handle_ipc_message(sender, message);
            }
            Err(e) => warn!(?sender, "dropping IPC message: {e}"),
        }
    }

    /// Handle one message and, when it carries an id, reply to the sender
    /// on `ipc-reply`.
    pub fn handle_ipc_message(
        &mut self,
        sender: IpcSender,
        message: IpcMessage,
    ) -> Result<Value, IpcError> {
        let result = IpcRequest::parse(&message).and_then(|request| self.dispatch_ipc(sender, request));
        match &result {
            Err(IpcError::UnknownKind(_)) => warn!(?sender, kind = %message.kind, "rejected IPC kind"),
            Err(e) => debug!(?sender, kind = %message.kind, "IPC request failed: {e}"),
            Ok(_) => {}
        }

        if let Some(id) = message.id {
            let reply = IpcReply::new(id, result.clone());
            match serde_json::to_value(&reply) {
                Ok(payload) => self.reply(sender, payload),
                Err(e) => warn!(?sender, "failed to encode IPC reply: {e}"),
            }
        }
        result
    }

    fn dispatch_ipc(&mut self, sender: IpcSender, request: IpcRequest) -> Result<Value, IpcError> {
        match request {
            IpcRequest::GetUser => {
                let window = self.sender_window(sender)?;
                let profile = self
                    .windows
                    .get(window)
                    .map(|w| w.profile().clone())
                    .ok_or(IpcError::NoWindow)?;
                Ok(json!(profile))
            }
            IpcRequest::GetUserConfig { user } => {
                let profile = self.profile_or_err(&user)?;
                Ok(config_to_value(profile.config()))
            }
            IpcRequest::SetUserConfig { user, patch } => {
                let config = {
                    let profile = self
                        .profiles
                        .get_mut(&user)
                        .ok_or_else(|| IpcError::UnknownProfile(user.to_string()))?;
                    profile.settings_mut().update(&patch).clone()
                };
                info!(profile = %user, "settings updated");
                let value = config_to_value(&config);
                self.runtime.set_theme(config.appearance.theme);

                for window in self.windows.windows_for_profile(&user) {
                    if let Some(w) = self.windows.get_mut(window) {
                        w.send(channels::SETTINGS_UPDATE, value.clone());
                    }
                    self.layout(window);
                    if let Some(w) = self.windows.get_mut(window) {
                        w.update_chrome();
                    }
                }
                self.publish(Event::SettingsUpdated(user));
                Ok(value)
            }
            IpcRequest::GetUserType { user } => {
                let profile = self.profile_or_err(&user)?;
                Ok(json!(profile.kind().name()))
            }
            IpcRequest::SetTheme { user } => {
                let theme = self.profile_or_err(&user)?.config().appearance.theme;
                self.runtime.set_theme(theme);
                Ok(json!(theme))
            }
            IpcRequest::GetHistory { user, limit } => {
                let history = self.profile_or_err(&user)?.history();
                Ok(json!(history.recent(limit)))
            }
            IpcRequest::ClearHistory { user } => {
                let profile = self
                    .profiles
                    .get_mut(&user)
                    .ok_or_else(|| IpcError::UnknownProfile(user.to_string()))?;
                profile
                    .history_mut()
                    .clear()
                    .map_err(|e| IpcError::Failed(e.to_string()))?;
                info!(profile = %user, "history cleared");
                Ok(json!(true))
            }
            IpcRequest::GetViewState { view } => {
                let view = self.target_view(sender, view)?;
                let state = self
                    .windows
                    .view(view)
                    .map(View::state)
                    .ok_or(IpcError::UnknownView(view))?;
                Ok(json!(state))
            }
            IpcRequest::Action(action) => {
                let window = self.sender_window(sender)?;
                self.execute(window, action)
                    .map_err(|e| IpcError::Failed(e.to_string()))?;
                Ok(Value::Null)
            }
            IpcRequest::FindInPage {
                view,
                text,
                match_case,
            } => {
                let view = self.target_view(sender, view)?;
                let state = self.find_in_page(view, &text, match_case);
                Ok(json!(state))
            }
            IpcRequest::MoveFindInPage { view, forward } => {
                let view = self.target_view(sender, view)?;
                Ok(json!(self.move_find_in_page(view, forward)))
            }
            IpcRequest::StopFindInPage { view, action } => {
                let view = self.target_view(sender, view)?;
                Ok(json!(self.stop_find_in_page(view, action)))
            }
            IpcRequest::ShowTabMenu { view } => {
                let window = self
                    .windows
                    .window_for_view(view)
                    .ok_or(IpcError::UnknownView(view))?;
                let Some(w) = self.windows.get_mut(window) else {
                    return Err(IpcError::NoWindow);
                };
                let ctx = w.tab_menu_context(view).ok_or(IpcError::UnknownView(view))?;
                w.host_mut().popup_menu(&tab_menu(&ctx));
                Ok(Value::Null)
            }
            IpcRequest::HideDialog => {
                let IpcSender::Surface(surface) = sender else {
                    return Ok(json!(false));
                };
                let Some(id) = self.dialogs.dialog_for_surface(surface) else {
                    return Ok(json!(false));
                };
                let kind = self.dialogs.get(id).map(|d| d.kind());
                self.dialogs.hide(id, &mut self.windows);
                if let Some(DialogKind::Find { view }) = kind {
                    self.forget_find_dialog(view);
                }
                Ok(json!(true))
            }
        }
    }

    fn profile_or_err(&self, user: &ProfileId) -> Result<&harbor_profile::Profile, IpcError> {
        self.profiles
            .get(user)
            .ok_or_else(|| IpcError::UnknownProfile(user.to_string()))
    }

    /// Window a message came from: the chrome's own window, a dialog's
    /// owner, or the window holding the sending tab.
    fn sender_window(&self, sender: IpcSender) -> Result<WindowId, IpcError> {
        let window = match sender {
            IpcSender::Window(window) => Some(window).filter(|w| self.windows.contains(*w)),
            IpcSender::Surface(surface) => match self.dialogs.dialog_for_surface(surface) {
                Some(id) => self.dialogs.get(id).map(|d| d.owner()),
                None => self.windows.window_for_view(ViewId(surface.0)),
            },
        };
        window.ok_or(IpcError::NoWindow)
    }

    /// Explicit view, else the find bar's own view, else the sender
    /// window's selected view.
    fn target_view(&self, sender: IpcSender, view: Option<ViewId>) -> Result<ViewId, IpcError> {
        if let Some(view) = view {
            return self
                .windows
                .view(view)
                .map(|v| v.id())
                .ok_or(IpcError::UnknownView(view));
        }
        if let IpcSender::Surface(surface) = sender {
            let find_view = self
                .dialogs
                .dialog_for_surface(surface)
                .and_then(|id| self.dialogs.get(id))
                .and_then(|d| match d.kind() {
                    DialogKind::Find { view } => Some(view),
                    _ => None,
                });
            if let Some(view) = find_view {
                return Ok(view);
            }
        }
        let window = self.sender_window(sender)?;
        self.windows
            .get(window)
            .and_then(|w| w.views().selected_id())
            .ok_or(IpcError::NoWindow)
    }

    fn reply(&mut self, sender: IpcSender, payload: Value) {
        match sender {
            IpcSender::Window(window) => {
                if let Some(w) = self.windows.get_mut(window) {
                    w.send(channels::IPC_REPLY, payload);
                }
            }
            IpcSender::Surface(surface) => {
                if let Some(id) = self.dialogs.dialog_for_surface(surface) {
                    if let Some(dialog) = self.dialogs.get_mut(id) {
                        dialog.send(channels::IPC_REPLY, payload);
                    }
                } else if let Some(v) = self.windows.view_mut(ViewId(surface.0)) {
                    v.surface_mut().send(channels::IPC_REPLY, payload);
                }
            }
        }
    }
}
