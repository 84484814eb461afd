use crate::app::AppContext;
use crate::cli::ProfileCommands;
use crate::output::{print_profile, profile_json};

pub fn handle_profile(ctx: &AppContext, command: &ProfileCommands) -> anyhow::Result<()> {
    let profiles = ctx.open_profiles()?;
    let user_id = ctx.user_id()?;

    match command {
        ProfileCommands::Show { json } => {
            let profile = profiles.get(&user_id)?;
            if *json {
                println!("{}", serde_json::to_string_pretty(&profile_json(&profile))?);
            } else {
                print_profile(&profile);
            }
        }
        ProfileCommands::Onboarded => {
            profiles.complete_onboarding(&user_id)?;
            if !ctx.quiet() {
                println!("Onboarding marked as completed");
            }
        }
        ProfileCommands::Name { name } => {
            let profile = profiles.set_display_name(&user_id, name.as_deref())?;
            if !ctx.quiet() {
                match profile.display_name {
                    Some(name) => println!("Display name set to {}", name),
                    None => println!("Display name cleared"),
                }
            }
        }
    }
    Ok(())
}
