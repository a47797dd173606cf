use crate::models::MealType;

/// Rutas de la SPA
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Auth,
    Onboarding,
    Dashboard,
    /// `/add-food?meal=lunch` preselecciona la comida
    AddFood { meal: Option<MealType> },
    Progress,
    Settings,
    NotFound(String),
}

impl Route {
    /// Parsea `pathname[?query]`
    pub fn parse(location: &str) -> Self {
        let (path, query) = match location.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (location, None),
        };
        let path = path.trim_end_matches('/');

        match path {
            "" => Route::Dashboard,
            "/auth" => Route::Auth,
            "/onboarding" => Route::Onboarding,
            "/add-food" => Route::AddFood {
                meal: query.and_then(|q| query_param(q, "meal")).and_then(MealType::from_str_opt),
            },
            "/progress" => Route::Progress,
            "/settings" => Route::Settings,
            other => Route::NotFound(other.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Auth => "/auth".to_string(),
            Route::Onboarding => "/onboarding".to_string(),
            Route::Dashboard => "/".to_string(),
            Route::AddFood { meal: Some(meal) } => format!("/add-food?meal={}", meal.as_str()),
            Route::AddFood { meal: None } => "/add-food".to_string(),
            Route::Progress => "/progress".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::NotFound(path) => path.clone(),
        }
    }

    /// Misma ruta sin parámetros de query
    pub fn without_query(&self) -> Self {
        match self {
            Route::AddFood { .. } => Route::AddFood { meal: None },
            other => other.clone(),
        }
    }

    /// Rutas con barra de navegación inferior
    pub fn shows_bottom_nav(&self) -> bool {
        matches!(
            self,
            Route::Dashboard | Route::AddFood { .. } | Route::Progress | Route::Settings
        )
    }
}

fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}
