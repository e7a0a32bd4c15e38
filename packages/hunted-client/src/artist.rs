//! Artist lookup: request options and name/ID pairing

use tracing::warn;

use crate::error::{HuntedError, HuntedResult};
use crate::models::{ArtistMatch, RawArtistResult};
use crate::query::{escape, Options};

/// Options for `/lookup/artist/`
///
/// A single name goes out as free text (`text=`); several go out as
/// repeated `name=` parameters. Values are form-encoded, so names such as
/// "Simon & Garfunkel" reach the API whole.
pub fn lookup_options<S: AsRef<str>>(names: &[S]) -> HuntedResult<Options> {
    let names: Vec<String> = names.iter().map(|n| escape(n.as_ref())).collect();
    match names.as_slice() {
        [] => Err(HuntedError::InvalidArgument(
            "artist lookup needs at least one name".to_string(),
        )),
        [single] => Ok(Options::new().with("text", single.as_str())),
        many => Ok(Options::new().with("name", many.to_vec())),
    }
}

/// Pair caller names with the IDs the API returned
///
/// The API answers in alphabetical order by name, so the names are sorted
/// (byte-wise, case-sensitive) and zipped positionally. A result count that
/// differs from the name count is an error rather than a silent truncation.
pub fn pair_artists<S: AsRef<str>>(names: &[S], ids: &[u64]) -> HuntedResult<Vec<ArtistMatch>> {
    if names.is_empty() {
        return Err(HuntedError::InvalidArgument(
            "artist lookup needs at least one name".to_string(),
        ));
    }
    if names.len() != ids.len() {
        return Err(HuntedError::PairingMismatch {
            expected: names.len(),
            actual: ids.len(),
        });
    }

    let mut sorted: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
    sorted.sort_unstable();

    Ok(sorted
        .into_iter()
        .zip(ids)
        .map(|(name, id)| ArtistMatch {
            name: name.to_string(),
            id: *id,
        })
        .collect())
}

/// Pair against raw lookup results, logging when the API echoes a name
/// that disagrees with the sorted input
pub(crate) fn pair_lookup_results<S: AsRef<str>>(
    names: &[S],
    results: &[RawArtistResult],
) -> HuntedResult<Vec<ArtistMatch>> {
    let ids: Vec<u64> = results.iter().map(RawArtistResult::id).collect();
    let pairs = pair_artists(names, &ids)?;

    for (pair, raw) in pairs.iter().zip(results) {
        if let Some(returned) = raw.name() {
            if returned != pair.name {
                warn!(
                    requested = %pair.name,
                    returned = %returned,
                    id = pair.id,
                    "Artist lookup order differs from requested names"
                );
            }
        }
    }

    Ok(pairs)
}
