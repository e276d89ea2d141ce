//! User-facing message catalogue.
//!
//! The document service is French-speaking; every message a user can see is
//! kept here so callers never hard-code text.

pub mod error {
    pub const NETWORK_ERROR: &str = "Erreur de connexion. Veuillez réessayer.";
    pub const UNAUTHORIZED: &str = "Session expirée. Veuillez vous reconnecter.";
    pub const BAD_REQUEST: &str = "Données invalides";
    pub const FORBIDDEN: &str = "Accès refusé";
    pub const NOT_FOUND: &str = "Ressource non trouvée";
    pub const SERVER_ERROR: &str = "Erreur serveur";
    pub const FILE_TOO_LARGE: &str = "Le fichier est trop volumineux (max 10MB).";
    pub const FILE_TYPE_NOT_SUPPORTED: &str =
        "Type de fichier non supporté. Utilisez PDF, DOCX ou PPTX.";
    pub const GENERIC_ERROR: &str = "Une erreur est survenue. Veuillez réessayer.";
    pub const UPLOAD_ERROR: &str = "Erreur lors de l'upload du fichier.";
    pub const DELETE_ERROR: &str = "Erreur lors de la suppression du fichier.";
}

pub mod success {
    pub const LOGIN_SUCCESS: &str = "Connexion réussie !";
    pub const REGISTER_SUCCESS: &str = "Inscription réussie !";
    pub const UPLOAD_SUCCESS: &str = "Fichier uploadé et classé avec succès !";
    pub const DELETE_SUCCESS: &str = "Fichier supprimé avec succès !";
    pub const LOGOUT_SUCCESS: &str = "Déconnexion réussie !";
}
