use super::*;
use crate::service::role::RoleService;

fn role_template(template: Value) -> Result<crate::model::role::RoleTemplate, AppError> {
    Ok(serde_json::from_value(template)?)
}

/// Tests creating a role that does not exist yet.
///
/// Verifies that the role is created with the template's colour, display flags and
/// permission set.
///
/// Expected: Ok with one CreateRole call
#[tokio::test]
async fn creates_missing_role() -> Result<(), AppError> {
    let remote = guild()?;
    let template = role_template(json!({
        "name": "Volunteers",
        "color": "#FFD700",
        "mentionable": true,
        "permissions": ["view_channel", "send_messages"],
    }))?;

    RoleService::new(&remote).ensure_role(&template).await?;

    assert_eq!(
        remote.calls().await,
        vec![RemoteCall::CreateRole(NewRole {
            name: "Volunteers".to_string(),
            colour: Colour(0xFFD700),
            hoist: false,
            mentionable: true,
            permissions: Permissions::VIEW_CHANNEL | Permissions::SEND_MESSAGES,
        })]
    );

    Ok(())
}

/// Tests updating several attributes of an existing role.
///
/// Verifies that every differing attribute is sent in one combined edit and that
/// attributes already matching are left out of it.
///
/// Expected: Ok with one EditRole call carrying colour and hoist
#[tokio::test]
async fn combines_role_changes_into_one_edit() -> Result<(), AppError> {
    let remote = guild()?.with_role(RoleFactory::new("Volunteers").mentionable(true).build());
    let template = role_template(json!({
        "name": "Volunteers",
        "color": "#FFD700",
        "hoist": true,
        "mentionable": true,
    }))?;

    RoleService::new(&remote).ensure_role(&template).await?;

    assert_eq!(
        remote.calls().await,
        vec![RemoteCall::EditRole {
            role: "Volunteers".to_string(),
            edit: RoleEdit {
                colour: Some(Colour(0xFFD700)),
                hoist: Some(true),
                ..RoleEdit::default()
            },
        }]
    );

    Ok(())
}

/// Tests that the colour of `@everyone` is never compared.
///
/// Verifies that a declared colour differing from the live one does not produce an edit,
/// while a differing permission set still does.
///
/// Expected: Ok with one EditRole call carrying only permissions
#[tokio::test]
async fn ignores_everyone_colour() -> Result<(), AppError> {
    let remote = guild()?;
    let template = role_template(json!({
        "name": "@everyone",
        "color": "#FF0000",
        "permissions": ["view_channel"],
    }))?;

    RoleService::new(&remote).ensure_role(&template).await?;
    RoleService::new(&remote).ensure_role(&template).await?;

    assert_eq!(
        remote.calls().await,
        vec![RemoteCall::EditRole {
            role: "@everyone".to_string(),
            edit: RoleEdit {
                permissions: Some(Permissions::VIEW_CHANNEL),
                ..RoleEdit::default()
            },
        }]
    );

    Ok(())
}

/// Tests a role that already matches its template.
///
/// Expected: Ok with no calls
#[tokio::test]
async fn leaves_matching_role_alone() -> Result<(), AppError> {
    let role = RoleFactory::new("Volunteers")
        .color(0xFFD700)
        .hoist(true)
        .permissions(Permissions::SEND_MESSAGES.bits())
        .build();
    let remote = guild()?.with_role(role);
    let template = role_template(json!({
        "name": "Volunteers",
        "color": "#FFD700",
        "hoist": true,
        "permissions": ["send_messages"],
    }))?;

    RoleService::new(&remote).ensure_role(&template).await?;

    assert_eq!(remote.calls().await, vec![]);

    Ok(())
}

/// Tests name resolution when several roles share a name.
///
/// Verifies that the role with the lowest position is the one edited.
///
/// Expected: Ok with the lower role updated and the higher one unchanged
#[tokio::test]
async fn edits_lowest_of_duplicate_roles() -> Result<(), AppError> {
    let lower = RoleFactory::new("Volunteers").position(1).build();
    let higher = RoleFactory::new("Volunteers").position(4).build();
    let higher_id = higher.id;
    let remote = guild()?.with_role(higher).with_role(lower.clone());
    let template = role_template(json!({ "name": "Volunteers", "color": "#FFD700" }))?;

    RoleService::new(&remote).ensure_role(&template).await?;

    let roles = crate::remote::GuildRemote::roles(&remote).await?;
    let colour_of = |id| roles.iter().find(|role| role.id == id).map(|role| role.colour);
    assert_eq!(colour_of(lower.id), Some(Colour(0xFFD700)));
    assert_eq!(colour_of(higher_id), Some(Colour(0)));

    Ok(())
}
