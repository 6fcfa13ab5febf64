// Admin persona: issues invitations and reads the dashboard

pub mod commands;
pub mod queries;
