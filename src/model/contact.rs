use crate::constants::MAX_PHONES_PER_CONTACT;
use crate::error::{AppError, Result};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A contact to be uploaded into a mailing container
///
/// The phone limit is checked on every constructor, so a `Contact` value
/// always holds at most [`MAX_PHONES_PER_CONTACT`] phones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contact {
    name: Option<String>,
    document: Option<String>,
    phones: Vec<String>,
    email: Option<String>,
    external_id: Option<String>,
    extra: Map<String, Value>,
}

impl Contact {
    /// Creates a contact with the given phones
    ///
    /// # Errors
    /// `AppError::InputInvalid` when more than 20 phones are given.
    pub fn new<I, P>(phones: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: ToString,
    {
        let phones: Vec<String> = phones.into_iter().map(|p| p.to_string()).collect();
        check_phone_count(phones.len())?;
        Ok(Self {
            phones,
            ..Self::default()
        })
    }

    /// Builds a contact from a JSON object.
    ///
    /// `name`, `document`, `phones`, `email` and `external_id` map to fields;
    /// numeric phones are coerced to strings. The entries of an `extra` object
    /// and any other key land in `extra`, flattened into the contact.
    ///
    /// # Errors
    /// `AppError::InputInvalid` when the value is not an object, `phones` is
    /// not an array or holds more than 20 entries, or `extra` is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut object) = value else {
            return Err(AppError::InputInvalid("contact must be a JSON object".to_string()));
        };

        let phones = match object.remove("phones") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(items)) => items.into_iter().map(value_to_text).collect(),
            Some(other) => {
                return Err(AppError::InputInvalid(format!(
                    "contact phones must be an array, got {other}"
                )));
            }
        };
        check_phone_count(phones.len())?;

        let declared_extra = match object.remove("extra") {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(AppError::InputInvalid(format!(
                    "contact extra must be an object, got {other}"
                )));
            }
        };

        let mut take = |key: &str| match object.remove(key) {
            None | Some(Value::Null) => None,
            Some(v) => Some(value_to_text(v)),
        };
        let name = take("name");
        let document = take("document");
        let email = take("email");
        let external_id = take("external_id");

        // Leftover keys first so the declared mapping wins on collisions.
        let mut extra = object;
        extra.extend(declared_extra);

        Ok(Self {
            name,
            document,
            email,
            external_id,
            phones,
            extra,
        })
    }

    /// Sets the name
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the document (CPF/CNPJ)
    #[must_use]
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }

    /// Sets the email
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the caller-side identifier
    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Adds a free-form field sent alongside the known ones
    #[must_use]
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Phone numbers, in the order given
    #[must_use]
    pub fn phones(&self) -> &[String] {
        &self.phones
    }

    /// Name, if any
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Document, if any
    #[must_use]
    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    /// Email, if any
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// External id, if any
    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    /// Extra fields
    #[must_use]
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Wire representation: absent fields omitted, extra keys merged last
    #[must_use]
    pub fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        let optional = [
            ("name", &self.name),
            ("document", &self.document),
            ("email", &self.email),
            ("external_id", &self.external_id),
        ];
        for (key, value) in optional {
            if let Some(v) = value {
                map.insert(key.to_string(), Value::String(v.clone()));
            }
        }
        map.insert(
            "phones".to_string(),
            Value::Array(self.phones.iter().cloned().map(Value::String).collect()),
        );
        for (key, value) in &self.extra {
            if value.is_null() {
                map.remove(key);
            } else {
                map.insert(key.clone(), value.clone());
            }
        }
        map
    }
}

impl Serialize for Contact {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_map().serialize(serializer)
    }
}

impl TryFrom<Value> for Contact {
    type Error = AppError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}

fn check_phone_count(count: usize) -> Result<()> {
    if count > MAX_PHONES_PER_CONTACT {
        return Err(AppError::InputInvalid(format!(
            "a contact may hold at most {MAX_PHONES_PER_CONTACT} phones, got {count}"
        )));
    }
    Ok(())
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
