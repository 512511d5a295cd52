//! Session Manager
//!
//! Drives the interactive workflows against a host. Conditions the user can
//! fix (bad name, nothing open, missing session) are reported through the
//! host and end the workflow with `Ok(Outcome::Aborted)`; only real I/O or
//! editor failures come back as `Err`.

use std::sync::Arc;

use session_builder_host::{
    dirty_count, has_open_files, sessionable_paths, Host, InputRequest, Message, PickRequest,
};
use session_builder_storage::{Session, SessionName, SessionStore, StorageError};
use session_builder_tree::SessionTree;

use crate::restore::{restore_files, RestoreReport};
use crate::workflow::{SwitchFlow, SwitchState};
use crate::Result;

const SWITCH_SAVE: &str = "Yes — Save and Continue";
const SWITCH_ONLY: &str = "No — Just Switch";
const UNSAVED_SAVE: &str = "💾 Save and Continue";
const UNSAVED_IGNORE: &str = "⚠️ Continue Without Saving";
const CANCEL: &str = "Cancel";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved(Session),
    Overwritten(Session),
    Restored {
        session: SessionName,
        report: RestoreReport,
    },
    /// `removed` is false when the file was already gone
    Deleted { session: SessionName, removed: bool },
    /// The user dismissed a prompt; nothing changed
    Cancelled,
    /// Stopped before touching anything, after telling the user why
    Aborted,
}

#[derive(Debug, Clone)]
pub struct ManagerOptions {
    /// Ask before the save command replaces an existing session
    pub confirm_save_over_existing: bool,
}

impl Default for ManagerOptions {
    fn default() -> Self {
        Self {
            confirm_save_over_existing: true,
        }
    }
}

enum UnsavedChoice {
    SaveAll,
    Ignore,
    Cancel,
}

pub struct SessionManager {
    store: SessionStore,
    tree: Arc<SessionTree>,
    options: ManagerOptions,
}

impl SessionManager {
    pub fn new(tree: Arc<SessionTree>, options: ManagerOptions) -> Self {
        Self {
            store: tree.store().clone(),
            tree,
            options,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn tree(&self) -> &Arc<SessionTree> {
        &self.tree
    }

    /// Save the open files under a name the user types in
    pub fn save_session<H: Host + ?Sized>(&self, host: &H) -> Result<Outcome> {
        let input = host.input(
            &InputRequest::new("Enter a name for this session")
                .with_placeholder("e.g., bugfixing, db-migration, etc."),
        );

        let Some(input) = input.filter(|s| !s.trim().is_empty()) else {
            host.notify(Message::warning("Session name is required."));
            return Ok(Outcome::Aborted);
        };

        let name = match SessionName::new(&input) {
            Ok(name) => name,
            Err(e) => {
                host.notify(Message::error(e.to_string()));
                return Ok(Outcome::Aborted);
            }
        };

        let files = sessionable_paths(&host.open_documents());
        if files.is_empty() {
            host.notify(Message::info("No open files to save."));
            return Ok(Outcome::Aborted);
        }

        if !self.confirm_replace(host, &name) {
            return Ok(Outcome::Cancelled);
        }

        let session = self.store.save(&name, &files)?;
        host.notify(Message::info(format!(
            "Session \"{name}\" saved with {} files.",
            session.file_count()
        )));
        self.tree.refresh();

        Ok(Outcome::Saved(session))
    }

    /// Pick a session and open its files alongside whatever is already open
    pub fn restore_session<H: Host + ?Sized>(&self, host: &H) -> Result<Outcome> {
        if !self.store.has_sessions_dir() {
            host.notify(Message::warning("No sessions have been saved yet."));
            return Ok(Outcome::Aborted);
        }

        let names = self.store.list()?;
        if names.is_empty() {
            host.notify(Message::warning("No sessions found."));
            return Ok(Outcome::Aborted);
        }

        let request = PickRequest::new(
            "Select a session to restore",
            names.iter().map(SessionName::file_name),
        );
        let Some(index) = host.pick(&request) else {
            return Ok(Outcome::Cancelled);
        };
        let Some(name) = names.into_iter().nth(index) else {
            return Ok(Outcome::Cancelled);
        };

        let Some(files) = self.load_for_restore(host, &name)? else {
            return Ok(Outcome::Aborted);
        };

        let report = restore_files(host, &name, &files);
        host.notify(Message::info(format!("Restored session \"{name}\".")));

        Ok(Outcome::Restored {
            session: name,
            report,
        })
    }

    /// Switch to `file_name`: optionally save the current files, close
    /// everything, then open the stored files
    pub fn restore_named_session<H: Host + ?Sized>(
        &self,
        host: &H,
        file_name: &str,
    ) -> Result<Outcome> {
        let Some(name) = parse_file_argument(host, file_name, "restore") else {
            return Ok(Outcome::Aborted);
        };

        let mut flow = SwitchFlow::new(name.as_str());

        if has_open_files(&host.open_documents()) {
            flow.advance(SwitchState::ConfirmSwitch)?;

            let choice = host.pick(&PickRequest::new(
                "Save current open files as a session before switching?",
                [SWITCH_SAVE, SWITCH_ONLY, CANCEL],
            ));

            match choice {
                Some(0) => {
                    if !self.save_before_switch(host, &mut flow)? {
                        flow.cancel();
                        return Ok(Outcome::Cancelled);
                    }
                }
                Some(1) => {}
                _ => {
                    flow.cancel();
                    return Ok(Outcome::Cancelled);
                }
            }
        }

        flow.advance(SwitchState::CloseAll)?;

        // Read before closing so an unreadable session leaves the editor as it was
        let Some(files) = self.load_for_restore(host, &name)? else {
            flow.cancel();
            return Ok(Outcome::Aborted);
        };

        host.close_all()?;

        flow.advance(SwitchState::Restoring)?;
        let report = restore_files(host, &name, &files);
        flow.advance(SwitchState::Done)?;

        host.notify(Message::info(format!("Restored session \"{name}\".")));

        Ok(Outcome::Restored {
            session: name,
            report,
        })
    }

    /// Replace the stored files of `file_name` with the open files
    pub fn overwrite_session<H: Host + ?Sized>(
        &self,
        host: &H,
        file_name: &str,
    ) -> Result<Outcome> {
        let Some(name) = parse_file_argument(host, file_name, "overwrite") else {
            return Ok(Outcome::Aborted);
        };

        let question =
            format!("Are you sure you want to overwrite \"{name}\" with currently open files?");
        if !host.confirm(&question, "Overwrite") {
            return Ok(Outcome::Cancelled);
        }

        match self.ask_unsaved(host) {
            UnsavedChoice::SaveAll => host.save_all()?,
            UnsavedChoice::Ignore => {}
            UnsavedChoice::Cancel => return Ok(Outcome::Cancelled),
        }

        let files = sessionable_paths(&host.open_documents());
        if files.is_empty() {
            host.notify(Message::info("No open files to save."));
            return Ok(Outcome::Aborted);
        }

        let session = self.store.overwrite(&name, &files)?;
        host.notify(Message::info(format!(
            "Session \"{name}\" overwritten with {} files.",
            session.file_count()
        )));
        self.tree.refresh();

        Ok(Outcome::Overwritten(session))
    }

    pub fn delete_session<H: Host + ?Sized>(&self, host: &H, file_name: &str) -> Result<Outcome> {
        let Some(name) = parse_file_argument(host, file_name, "deletion") else {
            return Ok(Outcome::Aborted);
        };

        if !host.confirm(&format!("Delete session \"{name}\"?"), "Delete") {
            return Ok(Outcome::Cancelled);
        }

        let removed = self.store.delete(&name)?;
        if removed {
            host.notify(Message::info(format!("Deleted session \"{name}\".")));
            self.tree.refresh();
        } else {
            host.notify(Message::warning(format!(
                "Session file not found: {}",
                name.file_name()
            )));
        }

        Ok(Outcome::Deleted {
            session: name,
            removed,
        })
    }

    /// Dirty check, name prompt and save ahead of a switch. Returns false if
    /// the switch must not go ahead: a cancel, a rejected name or a declined
    /// replace. Leaving the name empty skips the save and still switches.
    fn save_before_switch<H: Host + ?Sized>(&self, host: &H, flow: &mut SwitchFlow) -> Result<bool> {
        if dirty_count(&host.open_documents()) > 0 {
            flow.advance(SwitchState::ConfirmSave)?;
            match self.ask_unsaved(host) {
                UnsavedChoice::SaveAll => host.save_all()?,
                UnsavedChoice::Ignore => {}
                UnsavedChoice::Cancel => return Ok(false),
            }
        }

        flow.advance(SwitchState::SavingCurrent)?;

        let files = sessionable_paths(&host.open_documents());
        let input = host.input(
            &InputRequest::new("Enter a name to save your current session")
                .with_placeholder("e.g., temp-changes, debug-work"),
        );

        let Some(input) = input.filter(|s| !s.trim().is_empty()) else {
            tracing::debug!("No name given, switching without saving");
            return Ok(true);
        };

        let name = match SessionName::new(&input) {
            Ok(name) => name,
            Err(e) => {
                host.notify(Message::error(e.to_string()));
                return Ok(false);
            }
        };

        if files.is_empty() {
            host.notify(Message::info("No open files to save."));
            return Ok(true);
        }

        if !self.confirm_replace(host, &name) {
            return Ok(false);
        }

        self.store.save(&name, &files)?;
        host.notify(Message::info(format!("Session \"{name}\" saved.")));
        self.tree.refresh();

        Ok(true)
    }

    /// Ask about modified documents, if there are any
    fn ask_unsaved<H: Host + ?Sized>(&self, host: &H) -> UnsavedChoice {
        let dirty = dirty_count(&host.open_documents());
        if dirty == 0 {
            return UnsavedChoice::Ignore;
        }

        let choice = host.pick(&PickRequest::new(
            format!("You have {dirty} unsaved file(s). What do you want to do?"),
            [UNSAVED_SAVE, UNSAVED_IGNORE, CANCEL],
        ));

        match choice {
            Some(0) => UnsavedChoice::SaveAll,
            Some(1) => UnsavedChoice::Ignore,
            _ => UnsavedChoice::Cancel,
        }
    }

    fn confirm_replace<H: Host + ?Sized>(&self, host: &H, name: &SessionName) -> bool {
        if !self.options.confirm_save_over_existing || !self.store.exists(name) {
            return true;
        }

        host.confirm(
            &format!("Session \"{name}\" already exists. Overwrite it with currently open files?"),
            "Overwrite",
        )
    }

    /// Load a session for restoring. Missing or corrupt sessions are reported
    /// to the user and yield `None`.
    fn load_for_restore<H: Host + ?Sized>(
        &self,
        host: &H,
        name: &SessionName,
    ) -> Result<Option<Vec<String>>> {
        match self.store.load(name) {
            Ok(files) => Ok(Some(files)),
            Err(StorageError::NotFound(_)) => {
                host.notify(Message::warning(format!(
                    "Session file not found: {}",
                    name.file_name()
                )));
                Ok(None)
            }
            Err(e @ StorageError::Parse { .. }) => {
                tracing::error!(session = %name, error = %e, "Failed to parse session file");
                host.notify(Message::error(format!(
                    "Session \"{name}\" could not be read."
                )));
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

fn parse_file_argument<H: Host + ?Sized>(
    host: &H,
    file_name: &str,
    purpose: &str,
) -> Option<SessionName> {
    match SessionName::from_file_name(file_name) {
        Ok(name) => Some(name),
        Err(e) => {
            tracing::debug!(file = %file_name, error = %e, "Rejected session file argument");
            host.notify(Message::error(format!(
                "Invalid session file provided for {purpose}."
            )));
            None
        }
    }
}
