use std::collections::HashMap;

use setra_api::definition::SettingsGroup;

use crate::codec::ValueCodec;
use crate::error::CodecError;

/// Deserialize a raw settings map into a group through the codec.
///
/// Fields with no stored value fall back to their declared default; fields
/// with neither are left untouched. Definitions and fields line up
/// index-for-index, both in declaration order.
pub fn apply_group<G: SettingsGroup>(
    codec: &ValueCodec,
    group: &mut G,
    raw: &HashMap<String, String>,
) -> Result<(), CodecError> {
    let definitions = G::definitions();
    let mut fields = group.fields();
    for (slot, def) in fields.iter_mut().zip(&definitions) {
        let stored = raw.get(&def.name).or(def.default.as_ref());
        if let Some(stored) = stored {
            codec.deserialize_field(slot.as_mut(), stored, def.serializer.as_deref())?;
        }
    }
    Ok(())
}

/// Serialize every field of a group into a map keyed by setting name.
pub fn collect_group<G: SettingsGroup>(
    codec: &ValueCodec,
    group: &mut G,
) -> Result<HashMap<String, String>, CodecError> {
    let definitions = G::definitions();
    let mut out = HashMap::with_capacity(definitions.len());
    for (slot, def) in group.fields().iter().zip(&definitions) {
        let serialized = codec.serialize_field(slot.as_ref(), def.serializer.as_deref())?;
        out.insert(def.name.clone(), serialized);
    }
    Ok(out)
}
