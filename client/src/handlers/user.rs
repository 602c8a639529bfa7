//! Add-user command

use shared::Role;

use crate::external::UserDirectory;
use crate::services::{AddUserForm, Notifier, SubmitOutcome};

/// `swm add-user`: fill the form and submit it once
pub async fn add_user<D>(
    directory: &D,
    username: &str,
    password: &str,
    role: Role,
    notifier: &mut Notifier,
) -> (AddUserForm, SubmitOutcome)
where
    D: UserDirectory + ?Sized,
{
    let mut form = AddUserForm::new();
    form.username = username.to_string();
    form.password = password.to_string();
    form.role = role;

    let outcome = form.submit(directory, notifier).await;
    (form, outcome)
}
