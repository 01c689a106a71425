//! Contact Resolver - Maps Zoho recipients to contact records

use std::sync::Arc;

use campsync_storage::{Contact, RecordStore};
use chrono::Utc;
use tracing::debug;

use super::error::SyncError;
use crate::zoho::ZohoRecipient;

/// Resolves Zoho recipients to contact records, creating them on first sight.
pub struct ContactResolver {
    store: Arc<dyn RecordStore>,
}

impl ContactResolver {
    /// Create a new contact resolver
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Resolve the contact for a recipient, creating one when nothing matches.
    ///
    /// Lookup order is Zoho contact id first, then any email address on file.
    /// Recipients without an email address resolve to `None` (email is the
    /// minimum identity signal). Every successful resolution refreshes the
    /// Zoho bookkeeping fields and saves, so last-synced always moves.
    pub async fn resolve(&self, recipient: &ZohoRecipient) -> Result<Option<Contact>, SyncError> {
        let email = match recipient.email.as_deref().filter(|e| !e.is_empty()) {
            Some(email) => email,
            None => return Ok(None),
        };

        // Match by Zoho contact id
        if let Some(zoho_id) = recipient.contact_id.as_deref().filter(|id| !id.is_empty()) {
            if let Some(mut contact) = self.store.find_contact_by_zoho_id(zoho_id).await? {
                apply_zoho_fields(&mut contact, recipient);
                self.store.save_contact(&contact).await?;
                return Ok(Some(contact));
            }
        }

        // Match by email address
        if let Some(mut contact) = self.store.find_contact_by_email(email).await? {
            apply_zoho_fields(&mut contact, recipient);
            self.store.save_contact(&contact).await?;
            return Ok(Some(contact));
        }

        // Create a new contact
        let first_name = recipient
            .first_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        let mut contact = Contact::new(first_name);
        contact.last_name = recipient.last_name.clone();
        contact.add_email(email, true);
        if let Some(phone) = recipient.preferred_phone() {
            contact.add_phone(phone, true);
        }
        apply_zoho_fields(&mut contact, recipient);
        self.store.save_contact(&contact).await?;

        debug!("Created contact {} for {}", contact.name, email);
        Ok(Some(contact))
    }
}

/// Refresh the Zoho bookkeeping fields on a contact.
///
/// Company name and designation are sticky: locally curated values are never
/// overwritten, they are only filled in while empty.
fn apply_zoho_fields(contact: &mut Contact, recipient: &ZohoRecipient) {
    contact.zoho_contact_id = recipient.contact_id.clone();
    contact.zoho_status = recipient.contact_status.clone();
    contact.zoho_last_synced = Some(Utc::now());

    if is_blank(&contact.company_name) {
        if let Some(company) = recipient.company_name.clone().filter(|c| !c.is_empty()) {
            contact.company_name = Some(company);
        }
    }
    if is_blank(&contact.designation) {
        if let Some(title) = recipient.job_title.clone().filter(|t| !t.is_empty()) {
            contact.designation = Some(title);
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
