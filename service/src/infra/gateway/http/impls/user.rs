//! User-related [`Gateway`] implementations.

use common::operations::{By, Select};
use reqwest::Method;
use tracerr::Traced;

use crate::{
    infra::{
        gateway::{self, http::Http},
        Gateway,
    },
    read,
};

use super::UserData;

impl Gateway<Select<By<Vec<read::user::Record>, ()>>> for Http {
    type Ok = Vec<read::user::Record>;
    type Err = Traced<gateway::Error>;

    async fn execute(
        &self,
        Select(_): Select<By<Vec<read::user::Record>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        let data: Vec<UserData> = self
            .fetch(Method::GET, "users", None)
            .await
            .map_err(tracerr::wrap!())?;

        Ok(data.into_iter().map(UserData::into_record).collect())
    }
}
