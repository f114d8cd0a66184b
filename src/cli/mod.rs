pub mod commands;

use crate::cli::commands::{Commands, LogsAction};
use crate::config::AppConfig;
use crate::store::{FileTranscriptStore, TranscriptStore};

pub async fn run_cli(command: Commands, config_path: String) {
    let config = AppConfig::load(&config_path).expect("Failed to load config");

    match command {
        Commands::Serve => {
            panic!("Serve command should be intercepted by main.rs to boot actix-web");
        }
        Commands::Logs { action } => {
            let store = FileTranscriptStore::new(config.storage.path.clone());

            match action {
                LogsAction::List => {
                    let turns = store.list_all();
                    if turns.is_empty() {
                        println!("No chat logs found.");
                    } else {
                        println!("{:<20} | {:<25} | {}", "ID", "Timestamp", "User Message");
                        println!("{:-<20}-+-{:-<25}-+-{:-<30}", "", "", "");
                        for turn in turns {
                            let preview: String = turn.user_message.chars().take(60).collect();
                            println!(
                                "{:<20} | {:<25} | {}",
                                turn.id,
                                turn.timestamp.to_rfc3339(),
                                preview
                            );
                        }
                    }
                }
                LogsAction::Show { id } => match store.get_by_id(&id) {
                    Some(turn) => match serde_json::to_string_pretty(&turn) {
                        Ok(json) => println!("{}", json),
                        Err(e) => eprintln!("Error: {}", e),
                    },
                    None => eprintln!("No chat log found with ID {}", id),
                },
            }
        }
    }
}
