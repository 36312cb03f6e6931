//! Canned column policies for the three dashboard views

use crate::model::Drug;
use crate::model::Order;
use crate::model::Role;
use crate::model::User;

use super::ColumnDef;
use super::ColumnPolicy;
use super::RowAction;
use super::SortRule;
use super::Visibility;

fn user_action_visible(viewer: Role, row_role: Option<Role>) -> bool {
    match row_role {
        Some(role) => viewer.can_act_on(role),
        // Header cell: shown whenever the viewer can act on anyone at all.
        None => viewer != Role::Salesman,
    }
}

fn manager_or_above(viewer: Role) -> bool {
    matches!(viewer, Role::Admin | Role::Manager)
}

/// Policy for the Users view.
///
/// The numeric role column stays hidden (it only feeds the visibility
/// check); phone and the action column share the row gate, so both
/// disappear entirely for rows whose role the viewer cannot act on and a
/// Manager never sees a phone number or controls on an Admin row.
pub fn users_policy() -> ColumnPolicy<User> {
    ColumnPolicy::new(vec![
        ColumnDef::new("id", "ID").unsortable(),
        ColumnDef::new("avatar", "Avatar").unsortable().unfilterable(),
        ColumnDef::new("name", "Name"),
        ColumnDef::new("email", "Email"),
        ColumnDef::new("phone", "Phone").with_visibility(Visibility::PerRow(user_action_visible)),
        ColumnDef::new("role", "Role").with_visibility(Visibility::Hidden),
        ColumnDef::action("action", "Actions", &[RowAction::Edit, RowAction::Delete])
            .with_width(100)
            .with_visibility(Visibility::PerRow(user_action_visible)),
    ])
    .searchable(["id", "name", "email"])
}

/// Policy for the Drugs view.
///
/// Sorted by name ascending by default, and the sort can never be cleared:
/// the third header click reapplies ascending. The description column is
/// hidden from the grid (it shows in the detail dialog) but still feeds the
/// global search.
pub fn drugs_policy() -> ColumnPolicy<Drug> {
    ColumnPolicy::new(vec![
        ColumnDef::action("view", "View", &[RowAction::View, RowAction::Edit]),
        ColumnDef::new("id", "ID").unsortable(),
        ColumnDef::new("name", "Name"),
        ColumnDef::new("description", "Description").with_visibility(Visibility::Hidden),
        ColumnDef::new("price", "Price").with_render(|drug: &Drug| format!("${}", drug.price)),
        ColumnDef::new("quantity", "Quantity"),
        ColumnDef::new("mfg_date", "Mfg Date"),
        ColumnDef::new("exp_date", "Exp Date"),
    ])
    .searchable(["id", "name", "description"])
    .sort_rule(SortRule::RequireSorted { default_key: "name" })
}

/// Policy for the Orders view.
///
/// The action column is a plain viewer-capability check: Admin and Manager
/// see it, everyone else does not.
pub fn orders_policy() -> ColumnPolicy<Order> {
    ColumnPolicy::new(vec![
        ColumnDef::new("id", "Order ID").unsortable(),
        ColumnDef::new("name", "Customer"),
        ColumnDef::new("status", "Status"),
        ColumnDef::new("quantity", "Quantity"),
        ColumnDef::new("price", "Price"),
        ColumnDef::new("created_at", "Placed"),
        ColumnDef::action("action", "Actions", &[RowAction::Edit, RowAction::Delete])
            .with_visibility(Visibility::Viewer(manager_or_above)),
    ])
    .searchable(["id", "name", "description"])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.into(),
            f_name: "Test".into(),
            l_name: "User".into(),
            email: format!("{id}@pharmacy.test"),
            phone: "555-0100".into(),
            role,
            avatar: None,
        }
    }

    #[test]
    fn salesman_never_sees_the_users_action_column() {
        let policy = users_policy();
        let admin_row = user("U1", Role::Admin);
        let keys = policy.visible_keys(Role::Salesman, Some(&admin_row));
        assert!(!keys.contains(&"action"));
    }

    #[test]
    fn manager_sees_actions_on_subordinates_only() {
        let policy = users_policy();
        let admin_row = user("U1", Role::Admin);
        let pharmacist_row = user("U2", Role::Pharmacist);

        assert!(!policy
            .visible_keys(Role::Manager, Some(&admin_row))
            .contains(&"action"));
        assert!(policy
            .visible_keys(Role::Manager, Some(&pharmacist_row))
            .contains(&"action"));
    }

    #[test]
    fn admin_sees_actions_on_everyone() {
        let policy = users_policy();
        let admin_row = user("U1", Role::Admin);
        assert!(policy
            .visible_keys(Role::Admin, Some(&admin_row))
            .contains(&"action"));
    }

    #[test]
    fn phone_is_gated_like_the_action_column() {
        let policy = users_policy();
        let admin_row = user("U1", Role::Admin);
        let pharmacist_row = user("U2", Role::Pharmacist);

        assert!(!policy
            .visible_keys(Role::Manager, Some(&admin_row))
            .contains(&"phone"));
        assert!(policy
            .visible_keys(Role::Manager, Some(&pharmacist_row))
            .contains(&"phone"));
        assert!(!policy
            .visible_keys(Role::Salesman, Some(&pharmacist_row))
            .contains(&"phone"));
    }

    #[test]
    fn role_column_is_hidden_for_everyone() {
        let policy = users_policy();
        let row = user("U1", Role::Pharmacist);
        assert!(!policy.visible_keys(Role::Admin, Some(&row)).contains(&"role"));
    }

    #[test]
    fn orders_actions_are_gated_by_viewer_role_alone() {
        let policy = orders_policy();
        assert!(policy.visible_keys(Role::Manager, None).contains(&"created_at"));
        assert!(policy.visible_keys(Role::Manager, None).contains(&"action"));
        assert!(!policy.visible_keys(Role::Pharmacist, None).contains(&"action"));
        assert!(!policy.visible_keys(Role::Salesman, None).contains(&"action"));
    }

    #[test]
    fn drugs_description_is_hidden_but_searchable() {
        let policy = drugs_policy();
        assert!(!policy.visible_keys(Role::Admin, None).contains(&"description"));
        assert!(policy.searchable_keys().contains(&"description"));
    }
}
