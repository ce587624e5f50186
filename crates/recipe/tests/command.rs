use foodgram_recipe::{IngredientAmount, Query, RecipeUpdate};
use foodgram_shared::{Error, Viewer};
use temp_dir::TempDir;

mod helpers;

#[tokio::test]
async fn test_update_replaces_associations() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let c = helpers::catalog(dir.child("db.sqlite3")).await?;
    let salt = helpers::create_ingredient(&c.state.write_db, "salt", "g").await?;
    let query = Query::new(c.state.clone(), "http://localhost/media");

    let id = c
        .cmd
        .create(
            c.author,
            helpers::recipe("Soup", vec![c.breakfast, c.vegan], vec![(c.potato, 200)]),
        )
        .await?;

    let previous = c
        .cmd
        .update(
            id,
            c.author,
            RecipeUpdate {
                name: None,
                image: Some("recipes/images/soup-v2.png".to_owned()),
                text: None,
                cooking_time: Some(25),
                tags: vec![c.vegan],
                ingredients: vec![IngredientAmount { id: salt, amount: 5 }],
            },
        )
        .await?;
    assert_eq!(previous.as_deref(), Some("recipes/images/soup.png"));

    let recipe = query.find(id, &Viewer::Anonymous).await?;
    assert_eq!(recipe.name, "Soup");
    assert_eq!(recipe.cooking_time, 25);
    assert_eq!(recipe.image, "http://localhost/media/recipes/images/soup-v2.png");
    assert_eq!(recipe.tags.len(), 1);
    assert_eq!(recipe.tags[0].id, c.vegan);
    assert_eq!(recipe.ingredients.len(), 1);
    assert_eq!(recipe.ingredients[0].name, "salt");
    assert_eq!(recipe.ingredients[0].amount, 5);

    let previous = c
        .cmd
        .update(
            id,
            c.author,
            RecipeUpdate {
                name: Some("Soup".to_owned()),
                image: Some("recipes/images/soup-v2.png".to_owned()),
                text: None,
                cooking_time: None,
                tags: vec![c.vegan],
                ingredients: vec![IngredientAmount { id: salt, amount: 5 }],
            },
        )
        .await?;
    assert_eq!(previous, None);

    Ok(())
}

#[tokio::test]
async fn test_failed_update_rolls_back() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let c = helpers::catalog(dir.child("db.sqlite3")).await?;
    let query = Query::new(c.state.clone(), "http://localhost/media");

    let id = c
        .cmd
        .create(c.author, helpers::recipe("Soup", vec![c.breakfast], vec![(c.potato, 200)]))
        .await?;

    let err = c
        .cmd
        .update(
            id,
            c.author,
            RecipeUpdate {
                name: Some("Broth".to_owned()),
                image: None,
                text: None,
                cooking_time: None,
                tags: vec![c.vegan],
                ingredients: vec![IngredientAmount { id: 9999, amount: 1 }],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Invalid(_)), "{err}");

    let recipe = query.find(id, &Viewer::Anonymous).await?;
    assert_eq!(recipe.name, "Soup");
    assert_eq!(recipe.tags[0].id, c.breakfast);
    assert_eq!(recipe.ingredients[0].amount, 200);

    Ok(())
}

#[tokio::test]
async fn test_update_permissions() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let c = helpers::catalog(dir.child("db.sqlite3")).await?;
    let jane = helpers::create_user(&c.state.write_db, "jane").await?;

    let id = c
        .cmd
        .create(c.author, helpers::recipe("Soup", vec![c.breakfast], vec![(c.potato, 200)]))
        .await?;

    let input = RecipeUpdate {
        name: None,
        image: None,
        text: None,
        cooking_time: None,
        tags: vec![c.breakfast],
        ingredients: vec![IngredientAmount { id: c.potato, amount: 1 }],
    };

    let err = c.cmd.update(id, jane, input.clone()).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden));

    let err = c.cmd.update(id + 1, c.author, input).await.unwrap_err();
    assert_eq!(err.to_string(), "recipe not found");

    Ok(())
}

#[tokio::test]
async fn test_create_validation() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let c = helpers::catalog(dir.child("db.sqlite3")).await?;

    let mut input = helpers::recipe("Soup", vec![c.breakfast, c.breakfast], vec![(c.potato, 1)]);
    let err = c.cmd.create(c.author, input.clone()).await.unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    input.tags = vec![c.breakfast];
    input.ingredients[0].amount = 0;
    let err = c.cmd.create(c.author, input.clone()).await.unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    input.ingredients[0].amount = 1;
    input.cooking_time = 0;
    let err = c.cmd.create(c.author, input.clone()).await.unwrap_err();
    assert!(matches!(err, Error::Validate(_)));

    input.cooking_time = 5;
    c.cmd.create(c.author, input.clone()).await?;

    let err = c.cmd.create(c.author, input).await.unwrap_err();
    assert!(matches!(err, Error::AlreadyExists("recipe")));

    Ok(())
}

#[tokio::test]
async fn test_delete() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let c = helpers::catalog(dir.child("db.sqlite3")).await?;
    let jane = helpers::create_user(&c.state.write_db, "jane").await?;
    let query = Query::new(c.state.clone(), "http://localhost/media");

    let id = c
        .cmd
        .create(c.author, helpers::recipe("Soup", vec![c.breakfast], vec![(c.potato, 200)]))
        .await?;

    let err = c.cmd.delete(id, jane).await.unwrap_err();
    assert!(matches!(err, Error::Forbidden));

    let image = c.cmd.delete(id, c.author).await?;
    assert_eq!(image, "recipes/images/soup.png");

    let err = query.find(id, &Viewer::Anonymous).await.unwrap_err();
    assert!(matches!(err, Error::NotFound("recipe")));

    let err = c.cmd.delete(id, c.author).await.unwrap_err();
    assert_eq!(err.to_string(), "recipe not found");

    Ok(())
}
