mod home;
mod measurement_routes;
