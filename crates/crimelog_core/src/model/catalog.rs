//! Static catalog of type labels known to appear in the source feed.
//!
//! The feed may introduce new labels at any time. This list is reference data
//! for enumeration in front ends and is never used to reject events.

/// Known `type` labels, sorted as published.
pub const TYPE_CATALOG: &[&str] = &[
    "Alkohollagen",
    "Anträffad död",
    "Anträffat gods",
    "Arbetsplatsolycka",
    "Bedrägeri",
    "Bombhot",
    "Brand",
    "Brand automatlarm",
    "Bråk",
    "Detonation",
    "Djur skadat/omhändertaget",
    "Ekobrott",
    "Farligt föremål, misstänkt",
    "Fjällräddning",
    "Fylleri/LOB",
    "Förfalskningsbrott",
    "Försvunnen person",
    "Gränskontroll",
    "Häleri",
    "Inbrott",
    "Inbrott, försök",
    "Knivlagen",
    "Kontroll person/fordon",
    "Lagen om hundar och katter",
    "Larm inbrott",
    "Larm överfall",
    "Miljöbrott",
    "Missbruk av urkund",
    "Misshandel",
    "Misshandel, grov",
    "Mord/dråp",
    "Mord/dråp, försök",
    "Motorfordon, anträffat stulet",
    "Motorfordon, stöld",
    "Narkotikabrott",
    "Naturkatastrof",
    "Ofog barn/ungdom",
    "Ofredande/förargelse",
    "Olaga frihetsberövande",
    "Olaga hot",
    "Olaga intrång/hemfridsbrott",
    "Olovlig körning",
    "Ordningslagen",
    "Polisinsats/kommendering",
    "Rattfylleri",
    "Rån",
    "Rån väpnat",
    "Rån övrigt",
    "Rån, försök",
    "Räddningsinsats",
    "Sammanfattning dag",
    "Sammanfattning dygn",
    "Sammanfattning eftermiddag",
    "Sammanfattning förmiddag",
    "Sammanfattning helg",
    "Sammanfattning kväll",
    "Sammanfattning kväll och natt",
    "Sammanfattning natt",
    "Sammanfattning vecka",
    "Sedlighetsbrott",
    "Sjukdom/olycksfall",
    "Sjölagen",
    "Skadegörelse",
    "Skottlossning",
    "Skottlossning, misstänkt",
    "Spridning smittsamma kemikalier",
    "Stöld",
    "Stöld, försök",
    "Stöld, ringa",
    "Stöld/inbrott",
    "Tillfälligt obemannat",
    "Trafikbrott",
    "Trafikhinder",
    "Trafikkontroll",
    "Trafikolycka",
    "Trafikolycka, personskada",
    "Trafikolycka, singel",
    "Trafikolycka, smitning från",
    "Trafikolycka, vilt",
    "Uppdatering",
    "Utlänningslagen",
    "Vapenlagen",
    "Varningslarm/haveri",
    "Våld/hot mot tjänsteman",
    "Våldtäkt",
    "Våldtäkt, försök",
    "Vållande till kroppsskada",
];

/// Returns whether `label` matches a catalog entry, ignoring case.
pub fn is_known_type(label: &str) -> bool {
    let needle = label.trim().to_lowercase();
    TYPE_CATALOG
        .iter()
        .any(|known| known.to_lowercase() == needle)
}

#[cfg(test)]
mod tests {
    use super::{is_known_type, TYPE_CATALOG};

    #[test]
    fn catalog_has_no_duplicates() {
        let mut labels = TYPE_CATALOG.to_vec();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), TYPE_CATALOG.len());
    }

    #[test]
    fn known_type_lookup_ignores_case() {
        assert!(is_known_type("Inbrott"));
        assert!(is_known_type("  inbrott "));
        assert!(is_known_type("MORD/DRÅP"));
        assert!(!is_known_type("Cykelparad"));
    }
}
