use folio_core::TopicType;

/// Normalise user-typed type names (`" intro "` becomes `Intro`). An empty
/// list selects every type.
pub fn parse_types(names: &[String]) -> Vec<TopicType> {
    names.iter().map(|name| TopicType::from_filter(name)).collect()
}
