use std::io::{BufRead, Write};
use std::sync::Arc;

use mak3d_editor_lib::command::{execute_json, CommandResponse};
use mak3d_editor_lib::generator::HttpGenerator;
use mak3d_editor_lib::harness::HeadlessEditor;
use mak3d_editor_lib::state::scene::{ProjectDocument, SceneState};
use mak3d_editor_lib::state::{AppSettings, AppState};

fn main() {
    // stdout carries the command responses, so logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mak3d_editor=info,mak3d_editor_lib=info".into()),
        )
        .init();

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start async runtime: {e}");
            return;
        }
    };

    let settings = AppSettings::load();
    let generator = Arc::new(HttpGenerator::new(settings.generator.endpoint.clone()));
    tracing::info!("Generation service at {}", generator.generate_url());

    let autosave_enabled = settings.autosave.enabled;
    let state = match parse_scene_arg().or_else(SceneState::load_autosave) {
        Some(doc) => {
            tracing::info!("Opened project with {} objects", doc.objects.len());
            AppState::with_objects(settings, doc.objects)
        }
        None => AppState::new(settings),
    };
    let mut editor = HeadlessEditor::from_state(state).with_generator(generator, runtime.handle().clone());

    run_command_loop(&mut editor);

    if autosave_enabled {
        editor.state.scene.autosave();
    }
    let mut settings = editor.state.settings.clone();
    settings.display = editor.state.display;
    settings.save();
}

/// One JSON command per stdin line, one JSON response per stdout line
fn run_command_loop(editor: &mut HeadlessEditor) {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!("Failed to read command: {e}");
                break;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let response = execute_json(editor, &line).unwrap_or_else(CommandResponse::err);
        let out = serde_json::to_string(&response)
            .unwrap_or_else(|e| format!(r#"{{"success":false,"error":"{e}"}}"#));
        if writeln!(stdout, "{out}").and_then(|()| stdout.flush()).is_err() {
            break;
        }
    }
}

fn parse_scene_arg() -> Option<ProjectDocument> {
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--scene" && i + 1 < args.len() {
            let path = &args[i + 1];
            match ProjectDocument::load_from(std::path::Path::new(path)) {
                Ok(doc) => {
                    tracing::info!("Loaded scene from {path} ({} objects)", doc.objects.len());
                    return Some(doc);
                }
                Err(e) => {
                    tracing::error!("Failed to load scene file {path}: {e}");
                }
            }
            break;
        }
        i += 1;
    }
    None
}
