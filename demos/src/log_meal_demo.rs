use std::env;

use dotenv::dotenv;
use zenmotion_rust::input::MealForm;
use zenmotion_rust::prelude::*;

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    pretty_env_logger::init();

    let email = env::var("ZENMOTION_EMAIL").expect("ZENMOTION_EMAIL must be set");
    let password = env::var("ZENMOTION_PASSWORD").expect("ZENMOTION_PASSWORD must be set");

    let zen = ZenMotion::from_env()?;
    let session = zen.auth().login(&email, &password).await?;
    println!("Logged in as user {}", session.user_id);

    // Form values exactly as typed
    let form = MealForm {
        meal_type: "Almoço".to_string(),
        food_items: "arroz, feijão, salada".to_string(),
        calories: "650".to_string(),
        carbs: "80,5".to_string(),
        protein: "32".to_string(),
        fat: "".to_string(),
    };

    let meal = match form.into_new_meal(session.user_id) {
        Ok(meal) => meal,
        Err(Error::Validation { field, message }) => {
            eprintln!("{} {}", field, message);
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let created = zen.meals().create(&meal).await?;
    println!("Created meal {}: {:?}", created.id, created);

    let found = zen.meals().search("feijão").await?;
    println!("Search found {} meal(s)", found.len());

    let updated = zen
        .meals()
        .update(
            created.id,
            &MealPatch {
                calories: Some(700.0),
                ..Default::default()
            },
        )
        .await?;
    println!("Updated calories: {}", updated.calories);

    zen.meals().delete(created.id).await?;
    println!("Deleted meal {}", created.id);

    zen.auth().logout().await?;
    Ok(())
}
