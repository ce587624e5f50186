use foodgram_recipe::Membership;
use foodgram_shared::Error;
use foodgram_shopping::ShoppingItem;
use temp_dir::TempDir;

mod helpers;

fn item(name: &str, amount: i64, unit: &str) -> ShoppingItem {
    ShoppingItem {
        name: name.to_owned(),
        measurement_unit: unit.to_owned(),
        amount,
    }
}

#[tokio::test]
async fn test_cart_amounts_are_summed() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let c = helpers::catalog(dir.child("db.sqlite3")).await?;
    let pool = &c.state.read_db;
    let salt = helpers::create_ingredient(&c.state.write_db, "salt", "g").await?;
    let salt_kg = helpers::create_ingredient(&c.state.write_db, "salt", "kg").await?;

    let a = c
        .cmd
        .create(c.author, helpers::recipe("A", vec![c.breakfast], vec![(c.potato, 200)]))
        .await?;
    let b = c
        .cmd
        .create(
            c.author,
            helpers::recipe("B", vec![c.vegan], vec![(c.potato, 100), (salt, 5)]),
        )
        .await?;
    let other = c
        .cmd
        .create(c.author, helpers::recipe("C", vec![c.vegan], vec![(salt_kg, 1)]))
        .await?;

    c.cmd.add(Membership::Cart, c.author, b).await?;
    c.cmd.add(Membership::Cart, c.author, a).await?;
    c.cmd.add(Membership::Favorite, c.author, other).await?;

    let items = foodgram_shopping::shopping_list(pool, c.author).await?;
    assert_eq!(items, vec![item("potato", 300, "g"), item("salt", 5, "g")]);

    let text = foodgram_shopping::export(pool, c.author).await?;
    assert_eq!(text, "potato - 300 g.\nsalt - 5 g.\n");

    Ok(())
}

#[tokio::test]
async fn test_cart_order_does_not_matter() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let c = helpers::catalog(dir.child("db.sqlite3")).await?;
    let pool = &c.state.read_db;
    let jane = helpers::create_user(&c.state.write_db, "jane").await?;
    let salt = helpers::create_ingredient(&c.state.write_db, "salt", "g").await?;

    let a = c
        .cmd
        .create(c.author, helpers::recipe("A", vec![c.breakfast], vec![(c.potato, 200)]))
        .await?;
    let b = c
        .cmd
        .create(
            c.author,
            helpers::recipe("B", vec![c.vegan], vec![(c.potato, 100), (salt, 5)]),
        )
        .await?;

    c.cmd.add(Membership::Cart, c.author, a).await?;
    c.cmd.add(Membership::Cart, c.author, b).await?;
    c.cmd.add(Membership::Cart, jane, b).await?;
    c.cmd.add(Membership::Cart, jane, a).await?;

    let john = foodgram_shopping::shopping_list(pool, c.author).await?;
    let jane = foodgram_shopping::shopping_list(pool, jane).await?;
    assert_eq!(john, jane);
    assert_eq!(john, vec![item("potato", 300, "g"), item("salt", 5, "g")]);

    Ok(())
}

#[tokio::test]
async fn test_empty_cart_has_nothing_to_export() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let c = helpers::catalog(dir.child("db.sqlite3")).await?;
    let pool = &c.state.read_db;

    let a = c
        .cmd
        .create(c.author, helpers::recipe("A", vec![c.breakfast], vec![(c.potato, 200)]))
        .await?;
    c.cmd.add(Membership::Cart, c.author, a).await?;
    c.cmd.remove(Membership::Cart, c.author, a).await?;

    assert!(foodgram_shopping::shopping_list(pool, c.author).await?.is_empty());

    let err = foodgram_shopping::export(pool, c.author).await.unwrap_err();
    assert!(matches!(err, Error::AggregationEmpty));

    Ok(())
}
