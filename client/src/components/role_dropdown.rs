//! Role picker shared by the login and signup forms.

use leptos::prelude::*;

use crate::state::auth_wizard::{AuthWizard, Role};

#[component]
pub fn RoleDropdown(wizard: RwSignal<AuthWizard>) -> impl IntoView {
    let label = move || wizard.with(|w| w.role.map(Role::label).unwrap_or_default());
    let open = move || wizard.with(|w| w.role_menu_open);

    view! {
        <div class="role-dropdown">
            <input
                class="auth-input role-dropdown__input"
                type="text"
                placeholder="Role"
                readonly
                required
                prop:value=label
                on:click=move |_| wizard.update(AuthWizard::toggle_role_menu)
            />
            <Show when=open>
                <ul class="role-dropdown__menu" role="listbox">
                    {Role::ALL
                        .into_iter()
                        .map(|role| {
                            view! {
                                <li
                                    class="role-dropdown__option"
                                    role="option"
                                    on:click=move |_| wizard.update(|w| w.select_role(role))
                                >
                                    {role.label()}
                                </li>
                            }
                        })
                        .collect_view()}
                </ul>
            </Show>
        </div>
    }
}
