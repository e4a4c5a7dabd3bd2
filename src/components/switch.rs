use super::{text, Component, Draft, Field};
use crate::core::distributor::DistributorPart;
use crate::core::error::Result;
use crate::core::footprint::{ArtifactKind, Resolver};
use crate::core::identity::{build_ipn, ComponentFamily};

pub const FIELDS: &[Field] = &[text("package")];

const TACTILE: &str = "Tactile Switches";

pub(crate) fn from_distributor_part(
    part: &DistributorPart,
    resolver: &mut dyn Resolver,
) -> Result<Option<Component>> {
    let mut draft = Draft::from_part(ComponentFamily::Switch, part);
    let circuit = part.param("Circuit").unwrap_or("");
    let tactile = part.subcategory() == TACTILE;

    draft.set(
        "IPN",
        build_ipn(&["SW", draft.get("manufacturer"), part.mpn.as_str()]),
    );
    draft.set(
        "description",
        format!(
            "{} {} {}switch, {}",
            draft.get("manufacturer"),
            part.series,
            if tactile { "tactile " } else { "" },
            circuit
        ),
    );
    draft.set("keywords", if tactile { "button push" } else { "" });
    draft.set("value", "${MPN}");
    draft.set(
        "kicad_symbol",
        resolver.resolve_unknown(&part.dpn, ArtifactKind::Symbol),
    );
    draft.set(
        "kicad_footprint",
        resolver.resolve_unknown(&part.dpn, ArtifactKind::Footprint),
    );
    draft.set("package", &part.series);

    draft.finish().map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::test_support::part;
    use crate::core::footprint::ScriptedResolver;

    fn switch(subcategory: &str) -> DistributorPart {
        let mut p = part(
            "Switches",
            subcategory,
            "C&K",
            "PTS645SM43SMTR92 LFS",
            "CKN9112CT-ND",
            &[("Circuit", "SPST-NO"), ("Switch Function", "Off-Mom")],
        );
        p.series = "PTS645".to_string();
        p
    }

    #[test]
    fn test_tactile_switch() {
        let mut resolver = ScriptedResolver::new(["Switch:SW_Push", "Button_Switch_SMD:SW_SPST_PTS645"]);
        let comp = from_distributor_part(&switch(TACTILE), &mut resolver)
            .unwrap()
            .unwrap();

        assert_eq!(comp.ipn(), "SW_C&K_PTS645SM43SMTR92LFS");
        assert_eq!(
            comp.get("description"),
            Some("C&K PTS645 tactile switch, SPST-NO")
        );
        assert_eq!(comp.get("keywords"), Some("button push"));
        assert_eq!(comp.get("package"), Some("PTS645"));
        assert_eq!(comp.get("kicad_symbol"), Some("Switch:SW_Push"));
        assert_eq!(
            comp.get("kicad_footprint"),
            Some("Button_Switch_SMD:SW_SPST_PTS645")
        );
    }

    #[test]
    fn test_other_switch() {
        let mut resolver = ScriptedResolver::default();
        let comp = from_distributor_part(&switch("Slide Switches"), &mut resolver)
            .unwrap()
            .unwrap();
        assert_eq!(comp.get("description"), Some("C&K PTS645 switch, SPST-NO"));
        assert_eq!(comp.get("keywords"), Some(""));
    }
}
