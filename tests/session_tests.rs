use fzf_quick_open::core::dispatcher::DispatchOutcome;
use fzf_quick_open::core::host::{TerminalKind, TERMINAL_NAME, TERMINAL_NAME_PWD};
use fzf_quick_open::core::record::SelectionCommand;
use fzf_quick_open::core::session::Session;
use fzf_quick_open::core::{Platform, Settings};
use std::path::PathBuf;

mod common;
use common::{fixtures::*, host::*};

fn settings() -> Settings {
    Settings {
        forward_script: Some("/opt/topipe.sh".to_string()),
        ..Settings::default()
    }
}

fn session_with(host: RecordingHost, settings: Settings) -> Session<RecordingHost> {
    Session::new(host, settings, Platform::Posix, None)
}

#[cfg(test)]
mod terminal_tests {
    use super::*;

    #[test]
    fn test_file_open_creates_and_runs_in_workspace_terminal() -> anyhow::Result<()> {
        let mut session = session_with(RecordingHost::new(), settings());

        session.run_file_open(TerminalKind::Workspace)?;

        assert_eq!(
            session.host().calls,
            vec![
                HostCall::CreateTerminal {
                    name: TERMINAL_NAME.to_string(),
                    cwd: None
                },
                HostCall::ShowTerminal(TERMINAL_NAME.to_string()),
                HostCall::SendText {
                    name: TERMINAL_NAME.to_string(),
                    text: r#"fzf | "/opt/topipe.sh" open """#.to_string()
                },
            ]
        );
        assert_eq!(session.tracked_terminal(TerminalKind::Workspace), Some(TERMINAL_NAME));
        Ok(())
    }

    #[test]
    fn test_second_run_reuses_terminal() -> anyhow::Result<()> {
        let mut session = session_with(RecordingHost::new(), settings());

        session.run_file_open(TerminalKind::Workspace)?;
        session.run_folder_add(TerminalKind::Workspace)?;

        assert_eq!(session.host().created_terminals().len(), 1);
        assert_eq!(
            session.host().sent_to(TERMINAL_NAME)[1],
            r#"find . -type d | fzf | "/opt/topipe.sh" add """#
        );
        Ok(())
    }

    #[test]
    fn test_adopts_open_terminal_with_managed_name() -> anyhow::Result<()> {
        let mut host = RecordingHost::new();
        host.terminals.push(TERMINAL_NAME.to_string());
        let mut session = session_with(host, settings());

        session.run_file_open(TerminalKind::Workspace)?;

        assert!(session.host().created_terminals().is_empty());
        assert_eq!(session.tracked_terminal(TerminalKind::Workspace), Some(TERMINAL_NAME));
        Ok(())
    }

    #[test]
    fn test_initial_working_directory_setting_roots_new_terminal() -> anyhow::Result<()> {
        let mut host = RecordingHost::new();
        host.active_document = Some(PathBuf::from("/work/app/src/main.rs"));
        let mut session = session_with(
            host,
            Settings {
                initial_working_directory: "/srv/code".to_string(),
                ..settings()
            },
        );

        session.run_file_open(TerminalKind::Workspace)?;

        assert_eq!(
            session.host().calls[0],
            HostCall::CreateTerminal {
                name: TERMINAL_NAME.to_string(),
                cwd: Some(PathBuf::from("/srv/code"))
            }
        );
        Ok(())
    }

    #[test]
    fn test_pwd_terminal_follows_active_document() -> anyhow::Result<()> {
        let mut host = RecordingHost::new();
        host.active_document = Some(PathBuf::from("/work/app/src/main.rs"));
        let mut session = session_with(host, settings());

        session.run_file_open(TerminalKind::CurrentFileDir)?;

        assert_eq!(
            session.host().calls[0],
            HostCall::CreateTerminal {
                name: TERMINAL_NAME_PWD.to_string(),
                cwd: Some(PathBuf::from("/work/app/src"))
            }
        );
        assert_eq!(
            session.host().sent_to(TERMINAL_NAME_PWD),
            vec![
                "cd '/work/app/src'".to_string(),
                r#"fzf | "/opt/topipe.sh" open """#.to_string()
            ]
        );
        Ok(())
    }

    #[test]
    fn test_closing_one_terminal_keeps_the_other() -> anyhow::Result<()> {
        let mut session = session_with(RecordingHost::new(), settings());
        session.run_file_open(TerminalKind::Workspace)?;
        session.run_file_open(TerminalKind::CurrentFileDir)?;

        session.terminal_closed(TERMINAL_NAME);

        assert_eq!(session.tracked_terminal(TerminalKind::Workspace), None);
        assert_eq!(
            session.tracked_terminal(TerminalKind::CurrentFileDir),
            Some(TERMINAL_NAME_PWD)
        );
        Ok(())
    }

    #[test]
    fn test_closing_unmanaged_terminal_is_ignored() -> anyhow::Result<()> {
        let mut session = session_with(RecordingHost::new(), settings());
        session.run_file_open(TerminalKind::Workspace)?;

        session.terminal_closed("bash");

        assert_eq!(session.tracked_terminal(TerminalKind::Workspace), Some(TERMINAL_NAME));
        Ok(())
    }

    #[test]
    fn test_closed_terminal_is_recreated_on_next_run() -> anyhow::Result<()> {
        let mut session = session_with(RecordingHost::new(), settings());
        session.run_file_open(TerminalKind::Workspace)?;

        session.host_mut().terminals.clear();
        session.terminal_closed(TERMINAL_NAME);
        session.run_file_open(TerminalKind::Workspace)?;

        assert_eq!(session.host().created_terminals().len(), 2);
        Ok(())
    }
}

#[cfg(test)]
mod search_tests {
    use super::*;

    #[test]
    fn test_dismissed_prompt_runs_nothing() -> anyhow::Result<()> {
        let mut session = session_with(RecordingHost::new(), settings());

        let ran = session.run_search(TerminalKind::Workspace)?;

        assert!(!ran);
        assert!(session.host().calls.is_empty());
        Ok(())
    }

    #[test]
    fn test_prompt_starts_from_selected_text() -> anyhow::Result<()> {
        let mut host = RecordingHost::new();
        host.selection = Some("needle".to_string());
        host.prompt_answer = Some("needle".to_string());
        let mut session = session_with(host, settings());

        let ran = session.run_search(TerminalKind::Workspace)?;

        assert!(ran);
        assert_eq!(session.host().prompted_with, vec![Some("needle".to_string())]);
        assert_eq!(
            session.host().sent_to(TERMINAL_NAME),
            vec![
                r#"rg 'needle' --case-sensitive --vimgrep --color ansi | fzf --ansi | "/opt/topipe.sh" rg """#
                    .to_string()
            ]
        );
        Ok(())
    }
}

#[cfg(test)]
mod selection_tests {
    use super::*;

    #[test]
    fn test_close_after_search_hides_managed_terminal() -> anyhow::Result<()> {
        let workspace = create_project_workspace()?;
        let mut session = session_with(
            RecordingHost::new(),
            Settings {
                close_terminal_after_search: true,
                ..settings()
            },
        );
        session.run_file_open(TerminalKind::Workspace)?;
        session.host_mut().clear_calls();

        session.handle_record(&record(SelectionCommand::Open, workspace.path(), "README.md"))?;

        assert_eq!(
            session.host().calls,
            vec![
                HostCall::HideTerminal(TERMINAL_NAME.to_string()),
                HostCall::OpenDocument(workspace.path().join("README.md")),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_terminal_stays_when_policy_is_off() -> anyhow::Result<()> {
        let workspace = create_project_workspace()?;
        let mut session = session_with(RecordingHost::new(), settings());
        session.run_file_open(TerminalKind::Workspace)?;
        session.host_mut().clear_calls();

        session.handle_record(&record(SelectionCommand::Open, workspace.path(), "README.md"))?;

        assert_eq!(
            session.host().calls,
            vec![HostCall::OpenDocument(workspace.path().join("README.md"))]
        );
        Ok(())
    }

    #[test]
    fn test_unmanaged_active_terminal_is_not_hidden() -> anyhow::Result<()> {
        let workspace = create_project_workspace()?;
        let mut session = session_with(
            RecordingHost::new(),
            Settings {
                close_terminal_after_search: true,
                ..settings()
            },
        );
        session.run_file_open(TerminalKind::Workspace)?;
        session.host_mut().active_terminal = Some("bash".to_string());
        session.host_mut().clear_calls();

        session.handle_record(&record(SelectionCommand::Open, workspace.path(), "README.md"))?;

        assert!(!session
            .host()
            .calls
            .iter()
            .any(|call| matches!(call, HostCall::HideTerminal(_))));
        Ok(())
    }

    #[test]
    fn test_added_folder_refreshes_search_roots() -> anyhow::Result<()> {
        let workspace = create_project_workspace()?;
        let host = RecordingHost::with_workspace_folders(&[workspace.path()]);
        let mut session = session_with(
            host,
            Settings {
                use_workspace_folders_rg: true,
                ..settings()
            },
        );

        let outcome =
            session.handle_record(&record(SelectionCommand::Add, workspace.path(), "crates"))?;

        assert_eq!(
            outcome,
            DispatchOutcome::FolderAdded(workspace.path().join("crates"))
        );
        let roots = session.config().workspace_folder_paths.clone().unwrap_or_default();
        assert!(roots.contains(&*workspace.path().join("crates").to_string_lossy()));
        Ok(())
    }
}

#[cfg(test)]
mod settings_tests {
    use super::*;

    #[test]
    fn test_apply_settings_recomposes_pipelines() -> anyhow::Result<()> {
        let mut session = session_with(RecordingHost::new(), settings());

        session.apply_settings(Settings {
            fuzzy_cmd: "sk".to_string(),
            ..settings()
        });
        session.run_file_open(TerminalKind::Workspace)?;

        assert_eq!(session.config().fuzzy_cmd, "sk");
        assert_eq!(
            session.host().sent_to(TERMINAL_NAME),
            vec![r#"sk | "/opt/topipe.sh" open """#.to_string()]
        );
        Ok(())
    }

    #[test]
    fn test_refresh_picks_up_workspace_folders() -> anyhow::Result<()> {
        let mut session = session_with(
            RecordingHost::new(),
            Settings {
                use_workspace_folders_fzf: true,
                ..settings()
            },
        );
        assert_eq!(session.config().fzf_input_cmd, None);

        session
            .host_mut()
            .workspace_folders
            .push(PathBuf::from("/work/app"));
        session.refresh();

        assert_eq!(
            session.config().fzf_input_cmd.as_deref(),
            Some("fd '.*' '/work/app' --type f")
        );
        Ok(())
    }
}
