//! Clients, the client directory, and client tag extraction.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::CatalogError;
use crate::error::ParseError;
use crate::text::is_word_bounded;
use crate::types::ClientId;

static CLIENT_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@(?P<code>[A-Za-z0-9]+)").unwrap());

/// A client time can be billed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub code: String,
}

impl Client {
    pub fn new(id: ClientId, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
        }
    }

    pub fn tag(&self) -> String {
        format!("@{}", self.code)
    }
}

/// Read-only client lookup.
pub trait ClientDirectory: Send + Sync {
    /// Case-insensitive exact match on the client code.
    fn get_by_code(&self, code: &str) -> Option<&Client>;

    fn get_by_id(&self, id: &ClientId) -> Option<&Client>;
}

/// In-memory [`ClientDirectory`] indexed at construction.
#[derive(Debug, Clone, Default)]
pub struct ClientCatalog {
    clients: Vec<Client>,
    by_id: HashMap<ClientId, usize>,
    by_code: HashMap<String, usize>,
}

impl ClientCatalog {
    /// Builds the catalog. Ids must be unique, and codes unique ignoring case.
    pub fn new(clients: Vec<Client>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(clients.len());
        let mut by_code = HashMap::with_capacity(clients.len());

        for (index, client) in clients.iter().enumerate() {
            if client.code.trim().is_empty() {
                return Err(CatalogError::EmptyCode {
                    id: client.id.to_string(),
                });
            }
            if !client.code.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(CatalogError::UntypeableCode {
                    id: client.id.to_string(),
                    code: client.code.clone(),
                });
            }
            if by_id.insert(client.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateClientId {
                    id: client.id.clone(),
                });
            }
            if by_code.insert(client.code.to_lowercase(), index).is_some() {
                return Err(CatalogError::DuplicateClientCode {
                    code: client.code.clone(),
                });
            }
        }

        tracing::debug!(count = clients.len(), "built client catalog");
        Ok(Self {
            clients,
            by_id,
            by_code,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Client> {
        self.clients.iter()
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}

impl ClientDirectory for ClientCatalog {
    fn get_by_code(&self, code: &str) -> Option<&Client> {
        let code = code.trim().trim_start_matches('@').to_lowercase();
        self.by_code.get(&code).map(|&i| &self.clients[i])
    }

    fn get_by_id(&self, id: &ClientId) -> Option<&Client> {
        self.by_id.get(id).map(|&i| &self.clients[i])
    }
}

/// A client tag found in an entry, with the client it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedClientReference<'a> {
    /// The tag as typed, e.g. `@ABA`.
    pub matched_text: String,
    /// Byte range of `matched_text` within the input.
    pub span: Range<usize>,
    pub client: &'a Client,
}

/// Finds the optional client tag in `input` and resolves it.
///
/// An entry without a client tag yields `Ok(None)`.
pub fn extract_client<'a, D>(
    input: &str,
    clients: &'a D,
) -> Result<Option<ExtractedClientReference<'a>>, ParseError>
where
    D: ClientDirectory + ?Sized,
{
    let mut tags = CLIENT_TAG_RE.captures_iter(input).filter_map(|caps| {
        let whole = caps.get(0)?;
        let code = caps.name("code")?;
        is_word_bounded(input, &whole.range()).then_some((whole, code))
    });

    let Some((whole, code)) = tags.next() else {
        return Ok(None);
    };
    if tags.next().is_some() {
        return Err(ParseError::MultipleClients {
            input: input.to_string(),
        });
    }

    let Some(client) = clients.get_by_code(code.as_str()) else {
        tracing::debug!(code = code.as_str(), "client code did not resolve");
        return Err(ParseError::ClientNotFound {
            input: input.to_string(),
            code: code.as_str().to_string(),
        });
    };

    tracing::debug!(tag = whole.as_str(), client = %client.id, "resolved client");
    Ok(Some(ExtractedClientReference {
        matched_text: whole.as_str().to_string(),
        span: whole.range(),
        client,
    }))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn test_clients() -> ClientCatalog {
        ClientCatalog::new(vec![
            Client::new(ClientId::new("0001").unwrap(), "aba"),
            Client::new(ClientId::new("0002").unwrap(), "chemonics"),
        ])
        .unwrap()
    }

    fn resolve(input: &str) -> Result<Option<(String, String)>, &'static str> {
        let clients = test_clients();
        extract_client(input, &clients)
            .map(|r| r.map(|r| (r.client.id.to_string(), r.matched_text)))
            .map_err(|e| e.kind().as_str())
    }

    #[test]
    fn no_tag_is_not_an_error() {
        assert_eq!(resolve("#out 1h"), Ok(None));
        assert_eq!(resolve(""), Ok(None));
        assert_eq!(resolve("mail someone@aba.org"), Ok(None));
    }

    #[test]
    fn several_tags() {
        assert_eq!(resolve("@aba @chemonics"), Err("MULTIPLE_CLIENTS"));
        assert_eq!(resolve("1h #out @aba @aba"), Err("MULTIPLE_CLIENTS"));
    }

    #[test]
    fn unknown_code() {
        assert_eq!(resolve("#out @aaba 1h"), Err("CLIENT_NOT_FOUND"));

        let clients = test_clients();
        let err = extract_client("#out @aaba 1h", &clients).unwrap_err();
        assert_eq!(
            err,
            ParseError::ClientNotFound {
                input: "#out @aaba 1h".to_string(),
                code: "aaba".to_string(),
            }
        );
    }

    #[test]
    fn resolves_tags() {
        assert_eq!(
            resolve("1h #Support: ongoing @aba"),
            Ok(Some(("0001".to_string(), "@aba".to_string())))
        );
        assert_eq!(
            resolve("1h #Ongoing @chemonics"),
            Ok(Some(("0002".to_string(), "@chemonics".to_string())))
        );
        assert_eq!(
            resolve("@ABA update"),
            Ok(Some(("0001".to_string(), "@ABA".to_string())))
        );
    }

    #[test]
    fn resolution_is_stable() {
        let clients = test_clients();
        let first = clients.get_by_code("ABA").unwrap();
        let second = clients.get_by_code("aba").unwrap();
        assert!(std::ptr::eq(first, second));
        assert_eq!(clients.get_by_id(&first.id), Some(first));
    }

    #[test]
    fn catalog_rejects_duplicate_codes() {
        let err = ClientCatalog::new(vec![
            Client::new(ClientId::new("0001").unwrap(), "aba"),
            Client::new(ClientId::new("0002").unwrap(), "ABA"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateClientCode {
                code: "ABA".to_string()
            }
        );
    }

    #[test]
    fn catalog_rejects_codes_that_cannot_be_tagged() {
        let err = ClientCatalog::new(vec![Client::new(ClientId::new("0003").unwrap(), "save-the")])
            .unwrap_err();
        assert_eq!(
            err,
            CatalogError::UntypeableCode {
                id: "0003".to_string(),
                code: "save-the".to_string(),
            }
        );
    }
}
