use serenity::all::{Colour, Role, RoleId};
use tracing::{debug, info};

use crate::{
    error::reconcile::ReconcileError,
    model::role::RoleTemplate,
    remote::{
        edit::{NewRole, RoleEdit},
        lookup::GuildState,
        GuildRemote,
    },
    service::action::Action,
};

/// Compares a live role with its template.
///
/// An existing role gets a single edit carrying only the attributes that differ. The colour
/// of `@everyone` is never compared.
pub fn plan_role(
    live: Option<&Role>,
    template: &RoleTemplate,
) -> Action<NewRole, (RoleId, RoleEdit)> {
    let colour = Colour::from(template.color);
    let permissions = template.permission_set();

    let Some(role) = live else {
        return Action::Create(NewRole {
            name: template.name.clone(),
            colour,
            hoist: template.hoist,
            mentionable: template.mentionable,
            permissions,
        });
    };

    let mut edit = RoleEdit::default();
    if !template.is_everyone() && role.colour != colour {
        edit.colour = Some(colour);
    }
    if role.hoist != template.hoist {
        edit.hoist = Some(template.hoist);
    }
    if role.mentionable != template.mentionable {
        edit.mentionable = Some(template.mentionable);
    }
    if role.permissions != permissions {
        edit.permissions = Some(permissions);
    }

    if edit.is_empty() {
        Action::NoOp
    } else {
        Action::Update((role.id, edit))
    }
}

pub struct RoleService<'a> {
    remote: &'a dyn GuildRemote,
}

impl<'a> RoleService<'a> {
    pub fn new(remote: &'a dyn GuildRemote) -> Self {
        Self { remote }
    }

    /// Creates the role or brings its attributes in line with the template.
    pub async fn ensure_role(&self, template: &RoleTemplate) -> Result<(), ReconcileError> {
        info!("Ensure role {}", template.name);
        let live = GuildState::new(self.remote)
            .try_find_role(&template.name)
            .await?;

        match plan_role(live.as_ref(), template) {
            Action::NoOp => debug!("Role {} is up to date", template.name),
            Action::Create(role) => {
                debug!("Create role {}", template.name);
                self.remote.create_role(role).await?;
            }
            Action::Update((id, edit)) => {
                debug!("Update role {}: {:?}", template.name, edit);
                self.remote.edit_role(id, edit).await?;
            }
        }

        Ok(())
    }
}
