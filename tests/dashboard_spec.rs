mod common;

use std::cell::Cell;

use common::*;
use crossterm::event::KeyCode;
use sprint_core::{DocumentAdapter, Workspace};
use sprint_hub::dashboard::{action_for_key, Action, Dashboard, LazyAdapter, Status};
use speculate2::speculate;
use tempfile::TempDir;

speculate! {
    before {
        let tmp = TempDir::new().expect("Failed to create temp dir");
        let workspace = Workspace::new(tmp.path());
        let docs = FakeDocs::new();
        let connects = Cell::new(0);
        let mut adapter = LazyAdapter::new(|| {
            connects.set(connects.get() + 1);
            Ok(Box::new(docs.clone()) as Box<dyn DocumentAdapter>)
        });
    }

    describe "keys" {
        it "maps the documented bindings" {
            assert_eq!(action_for_key(KeyCode::Char('q')), Some(Action::Quit));
            assert_eq!(action_for_key(KeyCode::Char('p')), Some(Action::PushAll));
            assert_eq!(action_for_key(KeyCode::Char('r')), Some(Action::Refresh));
            assert_eq!(action_for_key(KeyCode::Char('d')), Some(Action::DeleteSelected));
            assert_eq!(action_for_key(KeyCode::Down), Some(Action::SelectNext));
            assert_eq!(action_for_key(KeyCode::Char('k')), Some(Action::SelectPrevious));
            assert_eq!(action_for_key(KeyCode::Char('x')), None);
        }
    }

    describe "without an active sprint" {
        it "shows an empty buffer" {
            let dashboard = Dashboard::load(Workspace::new(tmp.path()));
            assert!(dashboard.entries().is_empty());
            assert!(dashboard.sections().is_empty());
            assert!(dashboard.title().ends_with("no active sprint"));
        }

        it "refuses to push" {
            let mut dashboard = Dashboard::load(Workspace::new(tmp.path()));
            dashboard.apply(Action::PushAll, &mut adapter);

            assert_eq!(dashboard.status(), Some(&Status::Error("No active sprint.".to_string())));
            assert_eq!(connects.get(), 0);
        }
    }

    describe "with an active sprint" {
        before {
            active_sprint(&workspace);
            captured(&workspace, "port_scan", "22/tcp open");
            captured(&workspace, "notes", "misc");
            let mut dashboard = Dashboard::load(Workspace::new(tmp.path()));
        }

        it "lists entries and mapped sections" {
            assert!(dashboard.title().ends_with("sprint-test"));
            assert_eq!(dashboard.entries().len(), 2);
            assert!(dashboard.is_mapped("port_scan"));
            assert!(!dashboard.is_mapped("notes"));
            assert_eq!(
                dashboard.sections(),
                vec![
                    ("exec_summary".to_string(), "§ Executive Summary".to_string()),
                    ("port_scan".to_string(), "Enumeration!B4".to_string()),
                ]
            );
        }

        it "keeps the selection inside the list" {
            dashboard.apply(Action::SelectPrevious, &mut adapter);
            assert_eq!(dashboard.selected(), 0);
            dashboard.apply(Action::SelectNext, &mut adapter);
            dashboard.apply(Action::SelectNext, &mut adapter);
            assert_eq!(dashboard.selected(), 1);
        }

        it "deletes the selected entry" {
            dashboard.apply(Action::SelectNext, &mut adapter);
            dashboard.apply(Action::DeleteSelected, &mut adapter);

            assert_eq!(labels(&workspace), vec!["port_scan"]);
            assert_eq!(dashboard.selected(), 0);
            assert_eq!(dashboard.status(), Some(&Status::Info("Deleted 'notes'.".to_string())));
        }

        it "keeps the buffer after a partial push" {
            dashboard.apply(Action::PushAll, &mut adapter);

            assert_eq!(docs.writes(), vec!["sheet123:Enumeration!B4=22/tcp open".to_string()]);
            assert_eq!(dashboard.entries().len(), 2);
            assert!(matches!(
                dashboard.status(),
                Some(Status::Warning(message)) if message.starts_with("Done: 1 pushed, 1 errors.")
            ));
        }

        it "clears the buffer after a full push and connects once" {
            commands_remove(&workspace, "notes");
            dashboard.apply(Action::Refresh, &mut adapter);
            dashboard.apply(Action::PushAll, &mut adapter);
            captured(&workspace, "port_scan", "80/tcp open");
            dashboard.apply(Action::Refresh, &mut adapter);
            dashboard.apply(Action::PushAll, &mut adapter);

            assert_eq!(docs.writes().len(), 2);
            assert!(dashboard.entries().is_empty());
            assert_eq!(connects.get(), 1);
            assert_eq!(
                dashboard.status(),
                Some(&Status::Info("Done: 1 pushed, 0 errors.".to_string()))
            );
        }

        it "sees captures made outside after a refresh" {
            captured(&workspace, "ffuf_output", "/admin 200");
            assert_eq!(dashboard.entries().len(), 2);
            dashboard.apply(Action::Refresh, &mut adapter);
            assert_eq!(dashboard.entries().len(), 3);
        }

        it "quits" {
            assert!(!dashboard.should_quit());
            dashboard.apply(Action::Quit, &mut adapter);
            assert!(dashboard.should_quit());
        }
    }
}

fn commands_remove(workspace: &Workspace, label: &str) {
    sprint_hub::commands::remove(workspace, label).expect("Failed to remove");
}
