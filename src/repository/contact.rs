use diesel::prelude::*;

use crate::domain::contact::NewContactMessage;
use crate::models::contact::NewContactMessage as DbNewContactMessage;
use crate::repository::{ContactWriter, DieselRepository, RepositoryResult};

impl ContactWriter for DieselRepository {
    fn create_contact_message(&self, message: &NewContactMessage) -> RepositoryResult<usize> {
        use crate::schema::contact_messages;

        let mut conn = self.conn()?;
        let db_message: DbNewContactMessage = message.clone().into();

        let affected = diesel::insert_into(contact_messages::table)
            .values(db_message)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
