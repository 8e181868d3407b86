//! User store for the admin console.

use crate::models::{ProfileUpdate, RegisterRequest, User};
use crate::store::{Resource, Store};

pub struct Users;

impl Resource for Users {
    const PATH: &'static str = "/user";
    type Item = User;
    type Create = RegisterRequest;
    type Update = ProfileUpdate;
}

pub type UserStore = Store<Users>;
