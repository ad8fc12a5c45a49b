use menu::{CustomizationCatalog, CustomizationSelection, LineItem, MenuItem, ValidationError};
use tracing::warn;

/// The one item being configured, if any.
#[derive(Debug, Clone, Default)]
pub struct CustomizationSession {
    subject: Option<MenuItem>,
}

impl CustomizationSession {
    /// Refuses to open until the catalog exists, so nothing can be submitted
    /// without options to choose from.
    pub fn open(
        &mut self,
        item: MenuItem,
        catalog: Option<&CustomizationCatalog>,
    ) -> Result<(), ValidationError> {
        if catalog.is_none() {
            warn!("Customization options not loaded, cannot customize {}", item.name);
            return Err(ValidationError::CatalogUnavailable);
        }

        self.subject = Some(item);
        Ok(())
    }

    pub const fn is_open(&self) -> bool {
        self.subject.is_some()
    }

    pub const fn subject(&self) -> Option<&MenuItem> {
        self.subject.as_ref()
    }

    /// Prices the subject with `selection` and closes the session.
    pub fn submit(&mut self, selection: CustomizationSelection) -> Result<LineItem, ValidationError> {
        let item = self.subject.take().ok_or(ValidationError::NoSubject)?;

        Ok(LineItem::new(item, selection))
    }

    pub fn close(&mut self) {
        self.subject = None;
    }
}
