//! Support ticket aggregate.
//!
//! A ticket belongs to exactly one user for its whole life. Product and status
//! are closed enumerations; free text is limited to the description.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::UserId;
use crate::domain::ownership::Owned;

/// Stable ticket identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketId(Uuid);

impl TicketId {
    /// Parse an identifier from path text.
    ///
    /// Returns `None` for anything that is not a UUID so callers can treat a
    /// malformed id the same as an unknown one.
    ///
    /// # Examples
    /// ```
    /// use support_desk::domain::TicketId;
    ///
    /// assert!(TicketId::parse("2f1c6f6e-8b8e-4d0b-9d6a-0f7b8c1e2d3a").is_some());
    /// assert!(TicketId::parse("42").is_none());
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw.trim()).ok().map(Self)
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a fresh identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Product a ticket is raised against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Product {
    #[serde(rename = "iPhone")]
    IPhone,
    #[serde(rename = "Macbook")]
    Macbook,
    #[serde(rename = "iMac")]
    IMac,
    #[serde(rename = "iPad")]
    IPad,
    #[serde(rename = "Other")]
    Other,
}

impl Product {
    /// Every accepted product, in presentation order.
    pub const ALL: [Self; 5] = [
        Self::IPhone,
        Self::Macbook,
        Self::IMac,
        Self::IPad,
        Self::Other,
    ];

    /// Wire and storage spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::IPhone => "iPhone",
            Self::Macbook => "Macbook",
            Self::IMac => "iMac",
            Self::IPad => "iPad",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Product {
    type Err = TicketValidationError;

    /// Exact, case-sensitive match against [`Product::ALL`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|product| product.as_str() == s)
            .ok_or_else(|| TicketValidationError::UnknownProduct(s.to_owned()))
    }
}

/// Workflow state of a ticket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    #[default]
    New,
    Open,
    Closed,
}

impl TicketStatus {
    /// Every status, in workflow order.
    pub const ALL: [Self; 3] = [Self::New, Self::Open, Self::Closed];

    /// Wire and storage spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = TicketValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| TicketValidationError::UnknownStatus(s.to_owned()))
    }
}

/// Ticket fields that callers supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketField {
    Product,
    Description,
    Status,
}

impl TicketField {
    /// Wire name of the field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Product => "product",
            Self::Description => "description",
            Self::Status => "status",
        }
    }
}

/// Validation failures for ticket input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketValidationError {
    #[error("missing fields: {}", join_fields(.fields))]
    MissingFields { fields: Vec<TicketField> },
    #[error("unknown product: {0}")]
    UnknownProduct(String),
    #[error("unknown status: {0}")]
    UnknownStatus(String),
    #[error("description must not be blank")]
    BlankDescription,
    #[error("{} must be a string", .0.as_str())]
    NotText(TicketField),
}

impl TicketValidationError {
    /// The field the failure concerns, or the first missing one.
    pub fn field(&self) -> TicketField {
        match self {
            Self::MissingFields { fields } => {
                fields.first().copied().unwrap_or(TicketField::Product)
            }
            Self::UnknownProduct(_) => TicketField::Product,
            Self::UnknownStatus(_) => TicketField::Status,
            Self::BlankDescription => TicketField::Description,
            Self::NotText(field) => *field,
        }
    }
}

fn join_fields(fields: &[TicketField]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validated input for creating a ticket.
///
/// # Examples
/// ```
/// use support_desk::domain::{Product, TicketDraft};
///
/// let draft = TicketDraft::try_from_parts(Some("iPhone"), Some("Screen cracked")).unwrap();
/// assert_eq!(draft.product(), Product::IPhone);
/// assert!(TicketDraft::try_from_parts(Some("iPhone"), Some("  ")).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketDraft {
    product: Product,
    description: String,
}

impl TicketDraft {
    /// Check presence of both fields first, then the product spelling.
    pub fn try_from_parts(
        product: Option<&str>,
        description: Option<&str>,
    ) -> Result<Self, TicketValidationError> {
        let product_value = non_blank(product);
        let description_value = non_blank(description);
        let (Some(raw_product), Some(description_text)) = (product_value, description_value)
        else {
            let fields = [
                (TicketField::Product, product_value.is_none()),
                (TicketField::Description, description_value.is_none()),
            ]
            .into_iter()
            .filter_map(|(field, absent)| absent.then_some(field))
            .collect();
            return Err(TicketValidationError::MissingFields { fields });
        };
        Ok(Self {
            product: raw_product.parse()?,
            description: description_text.to_owned(),
        })
    }

    /// Product named in the request.
    pub fn product(&self) -> Product {
        self.product
    }

    /// Description as supplied.
    pub fn description(&self) -> &str {
        self.description.as_str()
    }
}

/// Validated partial update.
///
/// Absent fields are left untouched. There is no way to express a change of
/// owner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TicketPatch {
    product: Option<Product>,
    description: Option<String>,
    status: Option<TicketStatus>,
}

impl TicketPatch {
    /// Validate the optional raw fields of an update request.
    ///
    /// # Examples
    /// ```
    /// use support_desk::domain::{TicketPatch, TicketStatus};
    ///
    /// let patch = TicketPatch::try_from_parts(None, None, Some("closed")).unwrap();
    /// assert_eq!(patch.status(), Some(TicketStatus::Closed));
    /// assert!(TicketPatch::try_from_parts(None, None, Some("done")).is_err());
    /// ```
    pub fn try_from_parts(
        product: Option<&str>,
        description: Option<&str>,
        status: Option<&str>,
    ) -> Result<Self, TicketValidationError> {
        let product = product.map(str::parse::<Product>).transpose()?;
        let description = match description {
            Some(text) if text.trim().is_empty() => {
                return Err(TicketValidationError::BlankDescription);
            }
            Some(text) => Some(text.to_owned()),
            None => None,
        };
        let status = status.map(str::parse::<TicketStatus>).transpose()?;
        Ok(Self {
            product,
            description,
            status,
        })
    }

    /// `true` when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.product.is_none() && self.description.is_none() && self.status.is_none()
    }

    /// Replacement product, if any.
    pub fn product(&self) -> Option<Product> {
        self.product
    }

    /// Replacement description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Replacement status, if any.
    pub fn status(&self) -> Option<TicketStatus> {
        self.status
    }
}

/// A persisted support ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    id: TicketId,
    user: UserId,
    product: Product,
    description: String,
    status: TicketStatus,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Open a new ticket for `owner` with status [`TicketStatus::New`].
    pub fn open(id: TicketId, owner: UserId, draft: TicketDraft, now: DateTime<Utc>) -> Self {
        let TicketDraft {
            product,
            description,
        } = draft;
        Self {
            id,
            user: owner,
            product,
            description,
            status: TicketStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuild a ticket from stored values.
    pub fn from_parts(
        id: TicketId,
        user: UserId,
        product: Product,
        description: String,
        status: TicketStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user,
            product,
            description,
            status,
            created_at,
            updated_at,
        }
    }

    /// Apply `patch`, stamping `updated_at` when anything was supplied.
    ///
    /// The owner and creation time never change.
    #[must_use]
    pub fn apply(mut self, patch: TicketPatch, now: DateTime<Utc>) -> Self {
        if patch.is_empty() {
            return self;
        }
        let TicketPatch {
            product,
            description,
            status,
        } = patch;
        if let Some(value) = product {
            self.product = value;
        }
        if let Some(value) = description {
            self.description = value;
        }
        if let Some(value) = status {
            self.status = value;
        }
        self.updated_at = now;
        self
    }

    pub fn id(&self) -> &TicketId {
        &self.id
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    pub fn product(&self) -> Product {
        self.product
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn status(&self) -> TicketStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

impl Owned for Ticket {
    fn owner(&self) -> &UserId {
        &self.user
    }
}
